//! Shared fixtures for unit tests

use std::path::PathBuf;
use std::rc::Rc;

use crate::application::Packaging;
use crate::domain::ports::NoopLogger;
use crate::infrastructure::fs::MemoryFs;

/// Packaging over a `MemoryFs` with source directory `src` and output
/// directory `out`, seeded with `src/<path>` files
pub(crate) fn packaging_with(files: &[(&str, &str)]) -> (Packaging, MemoryFs) {
    let fs = MemoryFs::new();
    for (path, content) in files {
        fs.insert(PathBuf::from("src").join(path), *content);
    }
    let mut packaging = Packaging::new(Rc::new(fs.clone()), Rc::new(NoopLogger));
    packaging.set_source_directories(vec![PathBuf::from("src")]);
    packaging.set_output_directory("out");
    (packaging, fs)
}
