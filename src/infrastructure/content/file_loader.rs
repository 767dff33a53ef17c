//! Lazy disk loader

use std::path::{Path, PathBuf};

use crate::domain::ports::{ContentProvider, ContentRequest, FsError};
use crate::error::{PackError, PackResult};

/// Reads a source file from disk on demand.
///
/// Without a pinned path, the file is looked up by logical path in the
/// source directories, first match wins.
#[derive(Debug, Clone, Default)]
pub struct FileLoader {
    path: Option<PathBuf>,
}

impl FileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loader reading a fixed physical path
    pub fn pinned(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn locate(&self, request: &ContentRequest<'_>) -> PackResult<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        request.find_in_source_directories().ok_or_else(|| {
            let path = request.logical_path.to_path_buf();
            PackError::fs(path.clone(), FsError::NotFound(path))
        })
    }
}

impl ContentProvider for FileLoader {
    fn name(&self) -> &'static str {
        "file"
    }

    fn read_text(&self, request: &ContentRequest<'_>) -> Option<PackResult<String>> {
        Some(self.locate(request).and_then(|path| {
            request
                .fs
                .read_to_string(&path)
                .map_err(|e| PackError::fs(path, e))
        }))
    }

    fn read_binary(&self, request: &ContentRequest<'_>) -> Option<PackResult<Vec<u8>>> {
        Some(
            self.locate(request)
                .and_then(|path| request.fs.read(&path).map_err(|e| PackError::fs(path, e))),
        )
    }

    fn caches_reads(&self) -> bool {
        true
    }
}
