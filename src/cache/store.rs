use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use sha2::{Digest, Sha256};

use crate::foundation::core::Subpath;
use crate::foundation::error::CubistResult;
use crate::path::compiler::PathCompiler;

/// Content key for one raw path-command string: the first 16 hex characters
/// of its SHA-256 digest.
///
/// Keyed on the string before compilation, so two textually identical `d`
/// attributes share an entry regardless of where they appear.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn of(path_string: &str) -> Self {
        let digest = Sha256::digest(path_string.as_bytes());
        let mut key = String::with_capacity(16);
        for byte in &digest[..8] {
            key.push_str(&format!("{byte:02x}"));
        }
        Self(key)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key-value persistence for compiled subpath geometry.
///
/// Purely an optimization: implementations report failures by logging and
/// behaving as a miss (on `get`) or a no-op (on `put`), never by failing
/// the compile that consulted them.
pub trait GeometryStore {
    /// Returns the cached subpaths for `key`, or `None` on a miss or an
    /// unreadable entry.
    fn get(&self, key: &CacheKey) -> Option<Vec<Subpath>>;

    /// Persists `subpaths` under `key`.
    fn put(&mut self, key: &CacheKey, subpaths: &[Subpath]);
}

/// Directory-backed store with one `{key}_points.json` file per entry.
///
/// A lookup only hits when the companion `{key}_tris.json` written by the
/// downstream renderer is present as well, so geometry and its
/// triangulation stay paired.
#[derive(Debug)]
pub struct DirCache {
    dir: PathBuf,
}

impl DirCache {
    /// Opens (creating if needed) the cache directory.
    pub fn new(dir: impl Into<PathBuf>) -> CubistResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// File path of the geometry payload for `key`.
    pub fn points_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}_points.json", key.as_str()))
    }

    /// File path of the triangulation companion for `key`.
    pub fn tris_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}_tris.json", key.as_str()))
    }

    /// Deposits the renderer's triangulation payload for `key`, completing
    /// the entry so later lookups hit.
    pub fn put_triangulation(&self, key: &CacheKey, payload: &[u8]) {
        let path = self.tris_path(key);
        if let Err(err) = fs::write(&path, payload) {
            tracing::warn!(path = %path.display(), error = %err, "failed to write triangulation cache");
        }
    }
}

impl GeometryStore for DirCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<Subpath>> {
        let points = self.points_path(key);
        let tris = self.tris_path(key);
        if !points.is_file() || !tris.is_file() {
            return None;
        }
        let bytes = match fs::read(&points) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(path = %points.display(), error = %err, "failed to read cached geometry");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(subpaths) => Some(subpaths),
            Err(err) => {
                tracing::warn!(path = %points.display(), error = %err, "corrupt cached geometry, recompiling");
                None
            }
        }
    }

    fn put(&mut self, key: &CacheKey, subpaths: &[Subpath]) {
        let json = match serde_json::to_vec(subpaths) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!(error = %err, "failed to serialize geometry for cache");
                return;
            }
        };
        let path = self.points_path(key);
        if let Err(err) = fs::write(&path, json) {
            tracing::warn!(path = %path.display(), error = %err, "failed to write geometry cache");
        }
    }
}

/// In-memory store for tests and embedders without a data directory.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: HashMap<String, Vec<Subpath>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GeometryStore for MemoryCache {
    fn get(&self, key: &CacheKey) -> Option<Vec<Subpath>> {
        self.entries.get(key.as_str()).cloned()
    }

    fn put(&mut self, key: &CacheKey, subpaths: &[Subpath]) {
        self.entries
            .insert(key.as_str().to_owned(), subpaths.to_vec());
    }
}

/// Compiles `d` through `store`: a hit bypasses the compiler entirely, a
/// miss compiles and persists before returning.
pub fn compile_path_cached(
    compiler: &mut PathCompiler,
    store: &mut dyn GeometryStore,
    d: &str,
) -> CubistResult<Vec<Subpath>> {
    let key = CacheKey::of(d);
    if let Some(subpaths) = store.get(&key) {
        tracing::debug!(key = key.as_str(), "geometry cache hit");
        return Ok(subpaths);
    }
    tracing::debug!(key = key.as_str(), "geometry cache miss");
    let subpaths = compiler.compile(d)?;
    store.put(&key, &subpaths);
    Ok(subpaths)
}

#[cfg(test)]
#[path = "../../tests/unit/cache/store.rs"]
mod tests;
