//=========================================================================
// Asset Sources
//=========================================================================
//
// Where asset bytes come from. The assets manager only asks whether a name
// exists, for its bytes, and (for streamed kinds) for a real file path.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

//=== AssetSource Trait ===================================================

/// Read-only provider of named asset data.
pub trait AssetSource {
    /// Whether an asset with this name exists.
    fn exists(&self, name: &str) -> bool;

    /// Reads the whole asset.
    fn read(&self, name: &str) -> io::Result<Vec<u8>>;

    /// A filesystem path for the asset, if the source is backed by files.
    ///
    /// Sources that return `None` force streamed kinds through a temporary
    /// copy.
    fn file_path(&self, _name: &str) -> Option<PathBuf> {
        None
    }
}

//=== DirectorySource =====================================================

/// Loads assets from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl AssetSource for DirectorySource {
    fn exists(&self, name: &str) -> bool {
        self.resolve(name).is_file()
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.resolve(name))
    }

    fn file_path(&self, name: &str) -> Option<PathBuf> {
        let path = self.resolve(name);
        path.is_file().then_some(path)
    }
}

//=== MemorySource ========================================================

/// Serves assets from in-memory buffers (packed archives, tests).
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(name.into(), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_file(mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(name, bytes);
        self
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.files.remove(name).is_some()
    }
}

impl AssetSource for MemorySource {
    fn exists(&self, name: &str) -> bool {
        self.files.contains_key(name)
    }

    fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, name.to_string()))
    }
}

//=========================================================================
// Tests
//=========================================================================
