//! ContentProvider port - lazy source of a source file's payload
//!
//! A provider may support text, binary, or both. An unsupported read
//! returns `None`, which the packaging turns into an
//! `UnsupportedContent` error naming the file.

use std::path::PathBuf;

use crate::domain::ports::FileSystem;
use crate::domain::value_objects::LogicalPath;
use crate::error::PackResult;

/// Everything a provider may need to produce content
pub struct ContentRequest<'a> {
    pub logical_path: &'a LogicalPath,
    pub fs: &'a dyn FileSystem,
    pub source_directories: &'a [PathBuf],
}

impl ContentRequest<'_> {
    /// First source directory holding the logical path, if any
    pub fn find_in_source_directories(&self) -> Option<PathBuf> {
        let relative = self.logical_path.to_path_buf();
        self.source_directories
            .iter()
            .map(|dir| dir.join(&relative))
            .find(|candidate| self.fs.is_file(candidate))
    }
}

/// Provider of a source file's content
pub trait ContentProvider {
    /// Short name used in diagnostics
    fn name(&self) -> &'static str;

    /// Text content, `None` if this provider has no text capability
    fn read_text(&self, request: &ContentRequest<'_>) -> Option<PackResult<String>> {
        let _ = request;
        None
    }

    /// Binary content, `None` if this provider has no binary capability
    fn read_binary(&self, request: &ContentRequest<'_>) -> Option<PackResult<Vec<u8>>> {
        let _ = request;
        None
    }

    /// Whether reads should be kept on the source file until its content is cleared
    fn caches_reads(&self) -> bool {
        false
    }
}
