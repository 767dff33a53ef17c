//! OutputFile entity - one package to be written
//!
//! An output file owns the ordered list of source files packaged into it,
//! the builder that materializes it (resolved lazily), the physical path it
//! is written to (known just before building) and whether it was built.
//! Its logical path may change through `Packaging::rename_output_file`;
//! the id stays the same.

use std::fmt;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::ports::Builder;
use crate::domain::value_objects::LogicalPath;

use super::SourceId;

/// Stable handle of an output file inside its `Packaging`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputId(pub(crate) usize);

impl OutputId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A package registered in a packaging
pub struct OutputFile {
    id: OutputId,
    logical_path: LogicalPath,
    source_files: Vec<SourceId>,
    builder: Option<Rc<dyn Builder>>,
    output_path: Option<PathBuf>,
    finished: bool,
}

impl OutputFile {
    pub(crate) fn new(id: OutputId, logical_path: LogicalPath) -> Self {
        Self {
            id,
            logical_path,
            source_files: Vec::new(),
            builder: None,
            output_path: None,
            finished: false,
        }
    }

    pub fn id(&self) -> OutputId {
        self.id
    }

    pub fn logical_path(&self) -> &LogicalPath {
        &self.logical_path
    }

    pub(crate) fn set_logical_path(&mut self, path: LogicalPath) {
        self.logical_path = path;
    }

    /// Source files in packaging order
    pub fn source_files(&self) -> &[SourceId] {
        &self.source_files
    }

    /// Replace the order of the source files.
    ///
    /// Membership changes go through `Packaging::set_output_file`.
    pub(crate) fn set_source_order(&mut self, order: Vec<SourceId>) {
        self.source_files = order;
    }

    pub(crate) fn push_source(&mut self, source: SourceId) {
        self.source_files.push(source);
    }

    /// Remove a source by identity; returns false if it was not listed
    pub(crate) fn remove_source(&mut self, source: SourceId) -> bool {
        match self.source_files.iter().position(|s| *s == source) {
            Some(idx) => {
                self.source_files.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn builder(&self) -> Option<Rc<dyn Builder>> {
        self.builder.clone()
    }

    pub fn has_builder(&self) -> bool {
        self.builder.is_some()
    }

    pub(crate) fn set_builder(&mut self, builder: Rc<dyn Builder>) {
        self.builder = Some(builder);
    }

    /// Physical path, set just before the builder runs
    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub(crate) fn set_output_path(&mut self, path: PathBuf) {
        self.output_path = Some(path);
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn mark_finished(&mut self) {
        self.finished = true;
    }
}

impl fmt::Debug for OutputFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputFile")
            .field("id", &self.id)
            .field("logical_path", &self.logical_path)
            .field("source_files", &self.source_files)
            .field("builder", &self.builder.as_ref().map(|b| b.name()))
            .field("output_path", &self.output_path)
            .field("finished", &self.finished)
            .finish()
    }
}
