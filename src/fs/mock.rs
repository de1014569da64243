// src/fs/mock.rs

use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(String),
    Dir,
}

/// In-memory [`FileSystem`] for tests.
///
/// Paths are used verbatim as keys; `canonicalize` only checks that the entry
/// exists. Parent directories of added files are registered implicitly.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    entries: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
    writes: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<String>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        Self::ensure_parents(&mut entries, &path);
        entries.insert(path, MockEntry::File(content.into()));
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let path = path.as_ref().to_path_buf();
        let mut entries = self.entries.lock().unwrap();
        Self::ensure_parents(&mut entries, &path);
        entries.insert(path, MockEntry::Dir);
    }

    /// Current content of a file, if one exists at `path`.
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path.as_ref()) {
            Some(MockEntry::File(content)) => Some(content.clone()),
            _ => None,
        }
    }

    /// Paths successfully written through the trait, in order.
    pub fn writes(&self) -> Vec<PathBuf> {
        self.writes.lock().unwrap().clone()
    }

    fn ensure_parents(entries: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        let mut parent = path.parent();
        while let Some(dir) = parent {
            if dir.as_os_str().is_empty() {
                break;
            }
            entries.entry(dir.to_path_buf()).or_insert(MockEntry::Dir);
            parent = dir.parent();
        }
    }
}

impl FileSystem for MockFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        let entries = self.entries.lock().unwrap();
        match entries.get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Dir) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("No such file or directory: {:?}", path)),
        }
    }

    fn write_string(&self, path: &Path, contents: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap();
        if let Some(MockEntry::Dir) = entries.get(path) {
            return Err(anyhow!("Is a directory: {:?}", path));
        }
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty()
                && !matches!(entries.get(parent), Some(MockEntry::Dir))
            {
                return Err(anyhow!("No such file or directory: {:?}", parent));
            }
        }
        entries.insert(path.to_path_buf(), MockEntry::File(contents.to_string()));
        self.writes.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn canonicalize(&self, path: &Path) -> Result<PathBuf> {
        let entries = self.entries.lock().unwrap();
        if entries.contains_key(path) {
            Ok(path.to_path_buf())
        } else {
            Err(anyhow!("No such file or directory: {:?}", path))
        }
    }
}
