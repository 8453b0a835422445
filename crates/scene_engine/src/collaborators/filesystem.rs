//! File-system collaborator interface

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

/// File-system collaborator used for scene persistence
pub trait FileSystem {
    /// Read a whole file
    fn load(&self, path: &str) -> io::Result<Vec<u8>>;

    /// Write a whole file, replacing any existing content
    fn save(&mut self, path: &str, data: &[u8]) -> io::Result<()>;
}

/// File system backed by `std::fs`, rooted at a base directory
#[derive(Debug, Clone, Default)]
pub struct NativeFileSystem {
    root: PathBuf,
}

impl NativeFileSystem {
    /// Resolve paths relative to `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSystem for NativeFileSystem {
    fn load(&self, path: &str) -> io::Result<Vec<u8>> {
        std::fs::read(self.root.join(path))
    }

    fn save(&mut self, path: &str, data: &[u8]) -> io::Result<()> {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(full_path, data)
    }
}

/// In-memory file system
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSystem {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryFileSystem {
    /// Create an empty file system
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a file exists
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }
}

impl FileSystem for MemoryFileSystem {
    fn load(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path)))
    }

    fn save(&mut self, path: &str, data: &[u8]) -> io::Result<()> {
        self.files.insert(path.to_string(), data.to_vec());
        Ok(())
    }
}
