use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cubist::{AssetResolver, DirCache, DocumentWalker, WalkOptions};

#[derive(Parser, Debug)]
#[command(name = "cubist", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile an SVG document into geometry JSON.
    Compile(CompileArgs),
}

#[derive(Parser, Debug)]
struct CompileArgs {
    /// Input SVG: a file path, or a bare name probed against the assets
    /// directory (with and without a `.svg` suffix).
    #[arg(long = "in")]
    in_name: String,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory probed for bare input names.
    #[arg(long, default_value = "assets")]
    assets_dir: PathBuf,

    /// Geometry cache directory (caching disabled when omitted).
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Flatten groups into a leaf list instead of preserving them.
    #[arg(long, default_value_t = false)]
    flat: bool,

    /// Pretty-print the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
    }
}

fn cmd_compile(args: CompileArgs) -> anyhow::Result<()> {
    let resolver = AssetResolver::new(&args.assets_dir);
    let text = resolver
        .load(&args.in_name)
        .with_context(|| format!("load svg '{}'", args.in_name))?;

    let opts = WalkOptions {
        preserve_groups: !args.flat,
        ..WalkOptions::default()
    };

    let nodes = match &args.data_dir {
        Some(dir) => {
            let mut store =
                DirCache::new(dir).with_context(|| format!("open cache dir '{}'", dir.display()))?;
            DocumentWalker::with_store(opts, &mut store).compile_document(&text)?
        }
        None => DocumentWalker::new(opts).compile_document(&text)?,
    };

    let json = if args.pretty {
        serde_json::to_string_pretty(&nodes)?
    } else {
        serde_json::to_string(&nodes)?
    };

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent()
                && !parent.as_os_str().is_empty()
            {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            std::fs::write(out, json).with_context(|| format!("write json '{}'", out.display()))?;
            eprintln!("wrote {}", out.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}
