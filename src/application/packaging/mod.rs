//! Packaging orchestrator
//!
//! The `Packaging` owns every registry of a run:
//! - source files and output files (arena + path index)
//! - the FIFO queue of output files still to build
//! - the ordered visitor list and the builder/visitor type registries
//!
//! Entities refer to each other through `SourceId` / `OutputId`, so plugins
//! receive `&mut Packaging` plus ids and go through the methods here to read
//! or mutate anything.
//!
//! Execution is single-threaded and depth-first. Visitors are dispatched in
//! registration order; a visitor may re-enter the packaging (and thereby
//! other visitors) from inside a hook.

mod content;
mod files;
#[cfg(test)]
mod tests;

use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::domain::entities::{OutputFile, OutputId, SourceFile, SourceId};
use crate::domain::ports::{Builder, ContentProvider, FileSystem, Logger, Visitor};
use crate::domain::services::DependencyGraph;
use crate::domain::value_objects::{Descriptor, LogicalPath};
use crate::error::{ErrorClass, PackError, PackResult};
use crate::infrastructure::{builders, content::FileLoader, visitors};

use super::registry::TypeRegistry;

/// Default directory packages are written to
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "output";

/// A package description: an output file, its builder and its file patterns
#[derive(Debug)]
pub struct PackageSpec {
    pub name: String,
    pub builder: Option<Descriptor<dyn Builder>>,
    pub files: Vec<String>,
}

impl PackageSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            builder: None,
            files: Vec::new(),
        }
    }

    pub fn with_builder(mut self, builder: Descriptor<dyn Builder>) -> Self {
        self.builder = Some(builder);
        self
    }

    pub fn with_files<I, S>(mut self, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }
}

/// The packaging orchestrator
pub struct Packaging {
    fs: Rc<dyn FileSystem>,
    logger: Rc<dyn Logger>,
    source_directories: Vec<PathBuf>,
    output_directory: PathBuf,
    fail_fast: bool,
    sources: Vec<SourceFile>,
    source_index: BTreeMap<LogicalPath, SourceId>,
    outputs: Vec<OutputFile>,
    output_index: BTreeMap<LogicalPath, OutputId>,
    queue: VecDeque<OutputId>,
    visitors: Vec<Rc<dyn Visitor>>,
    default_builder: Option<Descriptor<dyn Builder>>,
    default_provider: Rc<dyn ContentProvider>,
    builder_types: TypeRegistry<dyn Builder>,
    visitor_types: TypeRegistry<dyn Visitor>,
    errors: Vec<PackError>,
}

impl Packaging {
    /// Create a packaging writing through `fs` and reporting through `logger`.
    ///
    /// The built-in builder and visitor types are registered.
    pub fn new(fs: Rc<dyn FileSystem>, logger: Rc<dyn Logger>) -> Self {
        Self {
            fs,
            logger,
            source_directories: Vec::new(),
            output_directory: PathBuf::from(DEFAULT_OUTPUT_DIRECTORY),
            fail_fast: false,
            sources: Vec::new(),
            source_index: BTreeMap::new(),
            outputs: Vec::new(),
            output_index: BTreeMap::new(),
            queue: VecDeque::new(),
            visitors: Vec::new(),
            default_builder: None,
            default_provider: Rc::new(FileLoader::new()),
            builder_types: builders::builtin_registry(),
            visitor_types: visitors::builtin_registry(),
            errors: Vec::new(),
        }
    }

    // === Settings ===

    pub fn fs(&self) -> Rc<dyn FileSystem> {
        Rc::clone(&self.fs)
    }

    pub fn logger(&self) -> Rc<dyn Logger> {
        Rc::clone(&self.logger)
    }

    pub fn source_directories(&self) -> &[PathBuf] {
        &self.source_directories
    }

    pub fn set_source_directories(&mut self, directories: Vec<PathBuf>) {
        self.source_directories = directories;
    }

    pub fn output_directory(&self) -> &Path {
        &self.output_directory
    }

    pub fn set_output_directory(&mut self, directory: impl Into<PathBuf>) {
        self.output_directory = directory.into();
    }

    /// When set, the first reported error aborts the run
    pub fn set_fail_fast(&mut self, fail_fast: bool) {
        self.fail_fast = fail_fast;
    }

    /// Builder used by output files that were not given one
    pub fn set_default_builder(&mut self, builder: Option<Descriptor<dyn Builder>>) {
        self.default_builder = builder;
    }

    pub fn builder_types_mut(&mut self) -> &mut TypeRegistry<dyn Builder> {
        &mut self.builder_types
    }

    pub fn visitor_types_mut(&mut self) -> &mut TypeRegistry<dyn Visitor> {
        &mut self.visitor_types
    }

    // === Object creation ===

    /// Resolve a builder descriptor (memoized on the descriptor)
    pub fn create_builder(&self, descriptor: &Descriptor<dyn Builder>) -> PackResult<Rc<dyn Builder>> {
        self.builder_types.create(descriptor)
    }

    /// Resolve a visitor descriptor (memoized on the descriptor)
    pub fn create_visitor(&self, descriptor: &Descriptor<dyn Visitor>) -> PackResult<Rc<dyn Visitor>> {
        self.visitor_types.create(descriptor)
    }

    // === Visitors ===

    pub fn add_visitor(&mut self, visitor: Rc<dyn Visitor>) {
        self.visitors.push(visitor);
    }

    /// Resolve and register visitors, in order
    pub fn add_visitors<'a, I>(&mut self, descriptors: I) -> PackResult<()>
    where
        I: IntoIterator<Item = &'a Descriptor<dyn Visitor>>,
    {
        for descriptor in descriptors {
            let visitor = self.create_visitor(descriptor)?;
            self.add_visitor(visitor);
        }
        Ok(())
    }

    pub fn visitors(&self) -> &[Rc<dyn Visitor>] {
        &self.visitors
    }

    /// Invoke one hook on every visitor, in registration order.
    ///
    /// The list is snapshotted first, so visitors registered during the
    /// dispatch only see later hooks.
    pub fn call_visitors<F>(&mut self, hook: &'static str, mut call: F) -> PackResult<()>
    where
        F: FnMut(&dyn Visitor, &mut Packaging) -> PackResult<()>,
    {
        let visitors = self.visitors.clone();
        for visitor in &visitors {
            tracing::trace!(hook, visitor = visitor.name(), "dispatching hook");
            call(visitor.as_ref(), self)?;
        }
        Ok(())
    }

    /// Fire `on_init`; call after all visitors are registered
    pub fn init(&mut self) -> PackResult<()> {
        self.call_visitors("on_init", |v, p| v.on_init(p))
    }

    // === Diagnostics ===

    /// Record a problem. Processing continues unless fail-fast is on, in
    /// which case the error is handed back to abort the run.
    pub fn report(&mut self, error: PackError) -> PackResult<()> {
        self.logger.error(&error.to_string());
        if self.fail_fast {
            return Err(error);
        }
        self.errors.push(error);
        Ok(())
    }

    /// Problems recorded so far
    pub fn errors(&self) -> &[PackError] {
        &self.errors
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    // === Build ===

    /// Build every queued output file.
    ///
    /// `on_reaching_build_end` fires each time the queue runs empty; visitors
    /// may queue more output files from there, which resumes the loop.
    pub fn build(&mut self) -> PackResult<()> {
        self.call_visitors("on_before_build", |v, p| v.on_before_build(p))?;
        if self.queue.is_empty() {
            self.call_visitors("on_reaching_build_end", |v, p| v.on_reaching_build_end(p))?;
        }
        while let Some(output) = self.queue.pop_front() {
            self.logger.debug(&format!(
                "Creating package {}...",
                self.outputs[output.0].logical_path()
            ));
            match self.build_output_file(output) {
                Ok(()) => {}
                Err(err) if err.class() == ErrorClass::Io => self.report(err)?,
                Err(err) => return Err(err),
            }
            if self.queue.is_empty() {
                self.call_visitors("on_reaching_build_end", |v, p| v.on_reaching_build_end(p))?;
            }
        }
        self.call_visitors("on_after_build", |v, p| v.on_after_build(p))
    }

    /// Build one output file with its builder (or the default builder)
    pub fn build_output_file(&mut self, output: OutputId) -> PackResult<()> {
        let builder = match self.outputs[output.0].builder() {
            Some(builder) => builder,
            None => match self.resolve_default_builder()? {
                Some(builder) => {
                    self.outputs[output.0].set_builder(Rc::clone(&builder));
                    builder
                }
                None => {
                    let name = self.outputs[output.0].logical_path().to_string();
                    return self.report(PackError::NoBuilder { output: name });
                }
            },
        };

        let path = self.physical_path(output);
        self.outputs[output.0].set_output_path(path);

        self.call_visitors("on_before_output_file_build", |v, p| {
            v.on_before_output_file_build(p, output)
        })?;
        builder.build(self, output)?;
        self.call_visitors("on_after_output_file_build", |v, p| {
            v.on_after_output_file_build(p, output)
        })?;
        self.outputs[output.0].mark_finished();
        Ok(())
    }

    fn resolve_default_builder(&self) -> PackResult<Option<Rc<dyn Builder>>> {
        match &self.default_builder {
            Some(descriptor) => self.builder_types.create(descriptor).map(Some),
            None => Ok(None),
        }
    }

    /// Where `output` is (or will be) written
    pub fn physical_path(&self, output: OutputId) -> PathBuf {
        self.output_directory
            .join(self.outputs[output.0].logical_path().to_path_buf())
    }

    /// Write a package: fires `on_write_output_file`, then writes the
    /// (possibly modified) bytes to the output file's physical path.
    pub fn write_output(&mut self, output: OutputId, mut content: Vec<u8>) -> PackResult<()> {
        self.call_visitors("on_write_output_file", |v, p| {
            v.on_write_output_file(p, output, &mut content)
        })?;
        let path = match self.outputs[output.0].output_path() {
            Some(path) => path.to_path_buf(),
            None => self.physical_path(output),
        };
        self.fs
            .write(&path, &content)
            .map_err(|e| PackError::fs(&path, e))
    }
}

impl std::fmt::Debug for Packaging {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Packaging")
            .field("source_directories", &self.source_directories)
            .field("output_directory", &self.output_directory)
            .field("sources", &self.sources.len())
            .field("outputs", &self.outputs.len())
            .field("queued", &self.queue.len())
            .field("visitors", &self.visitors.iter().map(|v| v.name()).collect::<Vec<_>>())
            .field("errors", &self.errors.len())
            .finish()
    }
}

impl DependencyGraph for Packaging {
    fn source_name(&self, source: SourceId) -> String {
        self.sources[source.0].logical_path().to_string()
    }

    fn output_name(&self, output: OutputId) -> String {
        self.outputs[output.0].logical_path().to_string()
    }

    fn owner(&self, source: SourceId) -> Option<OutputId> {
        self.sources[source.0].output_file()
    }

    fn is_finished(&self, output: OutputId) -> bool {
        self.outputs[output.0].is_finished()
    }

    fn dependencies(&mut self, source: SourceId) -> PackResult<Vec<SourceId>> {
        Packaging::dependencies(self, source)
    }

    fn adopt(&mut self, source: SourceId, output: OutputId) -> PackResult<()> {
        self.logger.debug(&format!(
            "Adding {} in dependent package {}",
            self.sources[source.0].logical_path(),
            self.outputs[output.0].logical_path()
        ));
        self.set_output_file(source, Some(output));
        Ok(())
    }
}
