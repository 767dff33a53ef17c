//! In-memory File System
//!
//! Implements the FileSystem port over a shared map of path to bytes.
//! Clones share the same tree, so a test can keep a handle and inspect
//! what the packaging wrote.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    files: Arc<Mutex<BTreeMap<PathBuf, Vec<u8>>>>,
}

/// Lexically normalized key: no `.` components, `..` folded
fn key(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file
    pub fn insert(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.lock().insert(key(path.as_ref()), content.into());
    }

    /// Content of a file as text, if present and valid UTF-8
    pub fn get_string(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .get(&key(path.as_ref()))
            .and_then(|bytes| String::from_utf8(bytes.clone()).ok())
    }

    /// Every stored file path, sorted
    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<PathBuf, Vec<u8>>> {
        // A poisoned lock still holds a consistent map: every operation is a
        // single insert/remove.
        self.files.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<Vec<u8>> {
        self.lock()
            .get(&key(path))
            .cloned()
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &[u8]) -> FsResult<()> {
        self.lock().insert(key(path), content.to_vec());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let wanted = key(path);
        let files = self.lock();
        files.contains_key(&wanted) || files.keys().any(|p| p.starts_with(&wanted))
    }

    fn is_file(&self, path: &Path) -> bool {
        self.lock().contains_key(&key(path))
    }

    fn rename(&self, from: &Path, to: &Path) -> FsResult<()> {
        let mut files = self.lock();
        let content = files
            .remove(&key(from))
            .ok_or_else(|| FsError::NotFound(from.to_path_buf()))?;
        files.insert(key(to), content);
        Ok(())
    }

    fn list_files(&self, root: &Path) -> FsResult<Vec<PathBuf>> {
        let root = key(root);
        Ok(self
            .lock()
            .keys()
            .filter_map(|p| p.strip_prefix(&root).ok())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect())
    }
}
