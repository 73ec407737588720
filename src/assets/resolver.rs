use std::fs;
use std::path::{Path, PathBuf};

use crate::foundation::error::{CubistError, CubistResult};

/// Maps requested document names to files on disk.
///
/// A name is probed as given, then relative to the configured assets
/// directory; names without an extension are additionally probed with
/// `.svg` appended. The not-found error reports every candidate tried.
#[derive(Clone, Debug)]
pub struct AssetResolver {
    assets_dir: PathBuf,
}

impl AssetResolver {
    pub fn new(assets_dir: impl Into<PathBuf>) -> Self {
        Self {
            assets_dir: assets_dir.into(),
        }
    }

    /// Candidate paths for `name`, in probe order.
    pub fn candidates(&self, name: &str) -> Vec<PathBuf> {
        let given = PathBuf::from(name);
        let mut candidates = vec![given.clone(), self.assets_dir.join(name)];
        if given.extension().is_none() {
            let with_ext = format!("{name}.svg");
            candidates.push(PathBuf::from(&with_ext));
            candidates.push(self.assets_dir.join(&with_ext));
        }
        candidates
    }

    /// Resolves `name` to the first candidate that is an existing file.
    pub fn resolve(&self, name: &str) -> CubistResult<PathBuf> {
        let candidates = self.candidates(name);
        for candidate in &candidates {
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }
        Err(CubistError::AssetNotFound {
            name: name.to_owned(),
            attempted: candidates,
        })
    }

    /// Resolves `name` and reads the document text.
    pub fn load(&self, name: &str) -> CubistResult<String> {
        let path = self.resolve(name)?;
        Ok(fs::read_to_string(&path)?)
    }

    /// The configured assets directory.
    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/resolver.rs"]
mod tests;
