//! Whole-file text access for tables, manifests and target files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads and writes whole text files.
pub trait TextStore {
    fn read_text(&self, path: &Path) -> Result<String, StoreError>;
    fn write_text(&mut self, path: &Path, text: &str) -> Result<(), StoreError>;
}

/// The filesystem, with relative paths resolved against `root`.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl TextStore for FsStore {
    fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        fs::read_to_string(self.resolve(path)).map_err(|source| StoreError::Read {
            path: path.to_owned(),
            source,
        })
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<(), StoreError> {
        fs::write(self.resolve(path), text).map_err(|source| StoreError::Write {
            path: path.to_owned(),
            source,
        })
    }
}

/// An in-memory file set, used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    files: IndexMap<PathBuf, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.files.insert(path.into(), text.into());
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.files.get(path.as_ref()).map(String::as_str)
    }
}

impl TextStore for MemoryStore {
    fn read_text(&self, path: &Path) -> Result<String, StoreError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| StoreError::Read {
                path: path.to_owned(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
    }

    fn write_text(&mut self, path: &Path, text: &str) -> Result<(), StoreError> {
        self.files.insert(path.to_owned(), text.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        store.insert("a.h", "one");
        assert_eq!(store.read_text(Path::new("a.h")).unwrap(), "one");
        store.write_text(Path::new("a.h"), "two").unwrap();
        assert_eq!(store.get("a.h"), Some("two"));
    }

    #[test]
    fn test_memory_store_missing_file() {
        let store = MemoryStore::new();
        let error = store.read_text(Path::new("missing.h")).unwrap_err();
        assert_eq!(error.to_string(), "failed to read missing.h");
    }

    #[test]
    fn test_fs_store_resolves_against_root() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsStore::new(dir.path());
        store.write_text(Path::new("x.txt"), "hello").unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("x.txt")).unwrap(),
            "hello"
        );
        assert_eq!(store.read_text(Path::new("x.txt")).unwrap(), "hello");
        assert!(matches!(
            store.read_text(Path::new("nope.txt")),
            Err(StoreError::Read { .. })
        ));
    }
}
