use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "cubist_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

#[test]
fn candidates_probe_bare_name_then_assets_dir_then_svg_suffix() {
    let resolver = AssetResolver::new("assets");
    assert_eq!(
        resolver.candidates("icon"),
        vec![
            PathBuf::from("icon"),
            PathBuf::from("assets/icon"),
            PathBuf::from("icon.svg"),
            PathBuf::from("assets/icon.svg"),
        ]
    );
    // A name with an extension is not re-suffixed.
    assert_eq!(
        resolver.candidates("icon.svg"),
        vec![PathBuf::from("icon.svg"), PathBuf::from("assets/icon.svg")]
    );
}

#[test]
fn resolve_finds_a_bare_name_in_the_assets_dir() {
    let tmp = temp_dir("resolver_bare");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("icon.svg"), "<svg/>").unwrap();

    let resolver = AssetResolver::new(&tmp);
    assert_eq!(resolver.assets_dir(), tmp.as_path());
    assert_eq!(resolver.resolve("icon").unwrap(), tmp.join("icon.svg"));

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn resolve_prefers_the_path_exactly_as_given() {
    let tmp = temp_dir("resolver_exact");
    std::fs::create_dir_all(&tmp).unwrap();
    let file = tmp.join("shape.svg");
    std::fs::write(&file, "<svg/>").unwrap();

    // The assets dir plays no part when the given path already exists.
    let resolver = AssetResolver::new("somewhere/else");
    let resolved = resolver.resolve(file.to_str().unwrap()).unwrap();
    assert_eq!(resolved, file);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_asset_reports_every_attempted_path() {
    let tmp = temp_dir("resolver_missing");
    std::fs::create_dir_all(&tmp).unwrap();

    let resolver = AssetResolver::new(&tmp);
    let err = resolver.resolve("ghost").unwrap_err();
    match err {
        CubistError::AssetNotFound { name, attempted } => {
            assert_eq!(name, "ghost");
            assert_eq!(attempted.len(), 4);
            assert!(attempted.contains(&tmp.join("ghost.svg")));
        }
        other => panic!("unexpected error: {other}"),
    }

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn load_reads_the_document_text() {
    let tmp = temp_dir("resolver_load");
    std::fs::create_dir_all(&tmp).unwrap();
    std::fs::write(tmp.join("doc.svg"), "<svg viewBox=\"0 0 1 1\"/>").unwrap();

    let resolver = AssetResolver::new(&tmp);
    let text = resolver.load("doc").unwrap();
    assert_eq!(text, "<svg viewBox=\"0 0 1 1\"/>");

    std::fs::remove_dir_all(&tmp).ok();
}
