//! Storage for generated decks and scaffolded projects.
//!
//! Content generation is pure; everything that touches disk goes through a
//! [`DeckStore`]:
//!
//! - [`FsStore`]: files under a root directory
//! - [`MemoryStore`]: in-memory map, for tests
//!
//! # Example
//!
//! ```ignore
//! use slideforge_storage::{DeckStore, FsStore};
//!
//! let store = FsStore::new("./decks");
//! let path = store.write("talk/slides.md", &markdown)?;
//! ```

pub mod project;

pub use project::{scaffold_project, PackageManifest, ProjectFiles, ProjectSpec};

use std::collections::HashMap;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

use slideforge_core::{Error, Result};
use tracing::debug;

/// Storage for deck files.
///
/// Paths are relative to the store root.
pub trait DeckStore: Send + Sync {
    /// Write `contents` to `path`, replacing any existing file.
    ///
    /// Returns the resolved location.
    fn write(&self, path: &str, contents: &str) -> Result<PathBuf>;

    /// Read a file.
    ///
    /// Returns `Ok(None)` if the file doesn't exist.
    fn read(&self, path: &str) -> Result<Option<String>>;

    /// Check if a file exists.
    fn exists(&self, path: &str) -> bool {
        matches!(self.read(path), Ok(Some(_)))
    }
}

/// Reject paths that could leave the store root.
pub fn relative_path(path: &str) -> Result<PathBuf> {
    let candidate = Path::new(path);
    if path.trim().is_empty() {
        return Err(Error::Storage("Path must not be empty".to_string()));
    }
    for component in candidate.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => {
                return Err(Error::Storage(format!(
                    "Path '{}' must not contain '..'",
                    path
                )))
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::Storage(format!(
                    "Path '{}' must be relative to the output root",
                    path
                )))
            }
        }
    }
    Ok(candidate.to_path_buf())
}

// =============================================================================
// FsStore - files under a root directory
// =============================================================================

/// Deck store backed by the local filesystem.
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Create a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> Result<PathBuf> {
        Ok(self.root.join(relative_path(path)?))
    }
}

impl DeckStore for FsStore {
    fn write(&self, path: &str, contents: &str) -> Result<PathBuf> {
        let target = self.resolve(path)?;
        debug!(path = ?target, bytes = contents.len(), "Writing file");

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!(
                    "Failed to create directory '{}': {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        std::fs::write(&target, contents).map_err(|e| {
            Error::Storage(format!("Failed to write '{}': {}", target.display(), e))
        })?;

        Ok(target)
    }

    fn read(&self, path: &str) -> Result<Option<String>> {
        let target = self.resolve(path)?;
        debug!(path = ?target, "Reading file");

        match std::fs::read_to_string(&target) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::Storage(format!(
                "Failed to read '{}': {}",
                target.display(),
                e
            ))),
        }
    }
}

// =============================================================================
// MemoryStore - In-memory implementation for testing
// =============================================================================

/// In-memory deck store for testing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<HashMap<PathBuf, String>>,
}

impl MemoryStore {
    /// Create a new in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with files.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let files = files
            .into_iter()
            .map(|(path, contents)| (PathBuf::from(path), contents.to_string()))
            .collect();
        Self {
            files: RwLock::new(files),
        }
    }

    /// Paths currently stored, sorted.
    pub fn paths(&self) -> Vec<PathBuf> {
        let mut paths: Vec<PathBuf> = self
            .files
            .read()
            .map(|files| files.keys().cloned().collect())
            .unwrap_or_default();
        paths.sort();
        paths
    }
}

impl DeckStore for MemoryStore {
    fn write(&self, path: &str, contents: &str) -> Result<PathBuf> {
        let path = relative_path(path)?;
        let mut files = self
            .files
            .write()
            .map_err(|e| Error::Storage(format!("Lock poisoned: {}", e)))?;
        files.insert(path.clone(), contents.to_string());
        Ok(path)
    }

    fn read(&self, path: &str) -> Result<Option<String>> {
        let path = relative_path(path)?;
        let files = self
            .files
            .read()
            .map_err(|e| Error::Storage(format!("Lock poisoned: {}", e)))?;
        Ok(files.get(&path).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_basic() {
        let store = MemoryStore::new();

        store.write("deck/slides.md", "# Hi").unwrap();
        assert_eq!(
            store.read("deck/slides.md").unwrap(),
            Some("# Hi".to_string())
        );
        assert!(store.exists("deck/slides.md"));
        assert!(!store.exists("other.md"));

        store.write("deck/slides.md", "# Replaced").unwrap();
        assert_eq!(
            store.read("deck/slides.md").unwrap(),
            Some("# Replaced".to_string())
        );
    }

    #[test]
    fn test_memory_store_with_files() {
        let store = MemoryStore::with_files([("a.md", "A"), ("b/c.md", "C")]);
        assert_eq!(store.paths(), vec![PathBuf::from("a.md"), PathBuf::from("b/c.md")]);
        assert_eq!(store.read("b/c.md").unwrap(), Some("C".to_string()));
    }

    #[test]
    fn test_relative_path_rules() {
        assert!(relative_path("slides.md").is_ok());
        assert!(relative_path("./talks/slides.md").is_ok());
        assert!(relative_path("").is_err());
        assert!(relative_path("../escape.md").is_err());
        assert!(relative_path("talks/../../escape.md").is_err());
        assert!(relative_path("/etc/passwd").is_err());
    }

    #[test]
    fn test_rejected_paths_are_storage_errors() {
        let store = MemoryStore::new();
        let err = store.write("../x.md", "x").unwrap_err();
        assert!(matches!(err, Error::Storage(_)));
        assert!(!store.exists("../x.md"));
    }

    #[test]
    fn test_fs_store_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());

        let written = store.write("nested/deep/slides.md", "---\n").unwrap();
        assert_eq!(written, dir.path().join("nested/deep/slides.md"));
        assert_eq!(std::fs::read_to_string(&written).unwrap(), "---\n");
        assert_eq!(
            store.read("nested/deep/slides.md").unwrap(),
            Some("---\n".to_string())
        );
    }

    #[test]
    fn test_fs_store_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FsStore::new(dir.path());
        assert_eq!(store.read("missing.md").unwrap(), None);
        assert!(!store.exists("missing.md"));
        assert_eq!(store.root(), dir.path());
    }
}
