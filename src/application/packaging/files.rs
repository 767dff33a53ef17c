//! Source and output file registries

use std::path::PathBuf;
use std::rc::Rc;

use crate::domain::entities::{OutputFile, OutputId, SourceFile, SourceId};
use crate::domain::ports::{Builder, ContentRequest};
use crate::domain::value_objects::{LogicalPath, PatternList};
use crate::error::{PackError, PackResult};

use super::{PackageSpec, Packaging};

impl Packaging {
    // === Source files ===

    /// Register a source file, or return the existing one for that path
    pub fn add_source_file(&mut self, path: impl AsRef<str>) -> PackResult<SourceId> {
        self.add_source_file_with(path, false)
    }

    /// Register a source file; with `must_create`, an existing entry is an error
    pub fn add_source_file_with(
        &mut self,
        path: impl AsRef<str>,
        must_create: bool,
    ) -> PackResult<SourceId> {
        let logical_path = LogicalPath::new(path);
        if let Some(&existing) = self.source_index.get(&logical_path) {
            if must_create {
                return Err(PackError::DuplicateSourceFile {
                    path: logical_path.to_string(),
                });
            }
            return Ok(existing);
        }

        let id = SourceId(self.sources.len());
        let provider = Rc::clone(&self.default_provider);
        self.sources
            .push(SourceFile::new(id, logical_path.clone(), provider));
        self.source_index.insert(logical_path, id);

        self.call_visitors("on_add_source_file", |v, p| v.on_add_source_file(p, id))?;
        Ok(id)
    }

    /// Register every file selected by `patterns` among the registered files
    /// and the files present in the source directories
    pub fn add_source_files(&mut self, patterns: &PatternList) -> PackResult<Vec<SourceId>> {
        let paths = self.expand_logical_paths(patterns, false)?;
        paths
            .into_iter()
            .map(|path| self.add_source_file(path))
            .collect()
    }

    /// Logical paths selected by `patterns`.
    ///
    /// Candidates are the registered source files, plus (unless
    /// `only_already_added`) every file found in the source directories.
    pub fn expand_logical_paths(
        &self,
        patterns: &PatternList,
        only_already_added: bool,
    ) -> PackResult<Vec<String>> {
        let mut candidates: Vec<String> = self
            .source_index
            .keys()
            .map(|path| path.to_string())
            .collect();

        if !only_already_added {
            for directory in &self.source_directories {
                if !self.fs.exists(directory) {
                    continue;
                }
                let files = self
                    .fs
                    .list_files(directory)
                    .map_err(|e| PackError::fs(directory, e))?;
                candidates.extend(files.iter().map(|f| LogicalPath::from_path(f).to_string()));
            }
            candidates.sort();
            candidates.dedup();
        }

        Ok(patterns.expand(candidates.iter().map(String::as_str)))
    }

    /// Lookup by (normalized) logical path
    pub fn get_source_file(&self, path: impl AsRef<str>) -> Option<SourceId> {
        self.source_index.get(&LogicalPath::new(path)).copied()
    }

    pub fn source(&self, id: SourceId) -> &SourceFile {
        &self.sources[id.0]
    }

    /// All source files, sorted by logical path
    pub fn source_ids(&self) -> Vec<SourceId> {
        self.source_index.values().copied().collect()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    pub fn source_matches(&self, id: SourceId, patterns: &PatternList) -> bool {
        patterns.is_match(self.sources[id.0].logical_path().as_str())
    }

    /// First source directory holding the file at `path`
    pub fn absolute_path(&self, path: &LogicalPath) -> Option<PathBuf> {
        ContentRequest {
            logical_path: path,
            fs: self.fs.as_ref(),
            source_directories: &self.source_directories,
        }
        .find_in_source_directories()
    }

    /// Move a source file into `output` (or out of any output with `None`).
    ///
    /// The file leaves the list of its previous output file and is appended
    /// to the new one. Binding to the current output changes nothing.
    pub fn set_output_file(&mut self, source: SourceId, output: Option<OutputId>) {
        let previous = self.sources[source.0].output_file();
        if previous == output {
            return;
        }
        if let Some(previous) = previous {
            self.outputs[previous.0].remove_source(source);
        }
        if let Some(output) = output {
            self.outputs[output.0].push_source(source);
        }
        self.sources[source.0].set_output_file(output);
    }

    /// Dependencies of a source file.
    ///
    /// Computed once through the `compute_dependencies` hook, then memoized.
    /// The memo is never invalidated, even if the graph changes afterwards.
    pub fn dependencies(&mut self, source: SourceId) -> PackResult<Vec<SourceId>> {
        if self.sources[source.0].begin_dependencies() {
            self.call_visitors("compute_dependencies", |v, p| {
                v.compute_dependencies(p, source)
            })?;
        }
        Ok(self.sources[source.0]
            .dependencies()
            .map(<[SourceId]>::to_vec)
            .unwrap_or_default())
    }

    /// Record that `source` depends on `dependency`; duplicates are ignored.
    ///
    /// Called from `compute_dependencies`. Called earlier, it seeds the list
    /// and the hook will not run for that file anymore.
    pub fn add_dependency(&mut self, source: SourceId, dependency: SourceId) -> bool {
        self.sources[source.0].record_dependency(dependency)
    }

    // === Output files ===

    /// Register an output file and queue it for building.
    ///
    /// An existing entry is returned as is, unless `must_create` is set.
    pub fn add_output_file(
        &mut self,
        path: impl AsRef<str>,
        must_create: bool,
    ) -> PackResult<OutputId> {
        let logical_path = LogicalPath::new(path);
        if let Some(&existing) = self.output_index.get(&logical_path) {
            if must_create {
                return Err(PackError::DuplicateOutputFile {
                    path: logical_path.to_string(),
                });
            }
            return Ok(existing);
        }

        let id = OutputId(self.outputs.len());
        self.outputs.push(OutputFile::new(id, logical_path.clone()));
        self.output_index.insert(logical_path, id);
        self.queue.push_back(id);

        self.call_visitors("on_add_output_file", |v, p| v.on_add_output_file(p, id))?;
        Ok(id)
    }

    /// Lookup by (normalized) logical path
    pub fn get_output_file(&self, path: impl AsRef<str>) -> Option<OutputId> {
        self.output_index.get(&LogicalPath::new(path)).copied()
    }

    pub fn output(&self, id: OutputId) -> &OutputFile {
        &self.outputs[id.0]
    }

    /// All output files, in creation order
    pub fn output_ids(&self) -> Vec<OutputId> {
        self.outputs.iter().map(OutputFile::id).collect()
    }

    /// Output files still waiting in the build queue
    pub fn queued(&self) -> impl Iterator<Item = OutputId> + '_ {
        self.queue.iter().copied()
    }

    pub fn output_matches(&self, id: OutputId, patterns: &PatternList) -> bool {
        patterns.is_match(self.outputs[id.0].logical_path().as_str())
    }

    pub fn set_builder(&mut self, output: OutputId, builder: Rc<dyn Builder>) {
        self.outputs[output.0].set_builder(builder);
    }

    /// Replace the order of an output file's sources
    pub fn set_source_order(&mut self, output: OutputId, order: Vec<SourceId>) {
        self.outputs[output.0].set_source_order(order);
    }

    /// Declare a package: its output file, optional builder and the files
    /// bound to it.
    pub fn add_package(&mut self, package: &PackageSpec) -> PackResult<OutputId> {
        let output = self.add_output_file(&package.name, false)?;

        if let Some(descriptor) = &package.builder {
            if self.outputs[output.0].has_builder() {
                return Err(PackError::BuilderAlreadySet {
                    output: self.outputs[output.0].logical_path().to_string(),
                });
            }
            let builder = self.create_builder(descriptor)?;
            self.outputs[output.0].set_builder(builder);
        }

        if !package.files.is_empty() {
            let patterns = PatternList::new(&package.files)?;
            for source in self.add_source_files(&patterns)? {
                match self.sources[source.0].output_file() {
                    Some(existing) if existing == output => {}
                    Some(existing) => {
                        return Err(PackError::ConflictingBinding {
                            source_file: self.sources[source.0].logical_path().to_string(),
                            existing: self.outputs[existing.0].logical_path().to_string(),
                            requested: self.outputs[output.0].logical_path().to_string(),
                        });
                    }
                    None => self.set_output_file(source, Some(output)),
                }
            }
        }

        Ok(output)
    }

    pub fn add_packages<'a, I>(&mut self, packages: I) -> PackResult<Vec<OutputId>>
    where
        I: IntoIterator<Item = &'a PackageSpec>,
    {
        packages
            .into_iter()
            .map(|package| self.add_package(package))
            .collect()
    }

    /// Change the logical path of an output file, keeping its identity.
    ///
    /// If the file was already written, it is moved on disk as well.
    pub fn rename_output_file(
        &mut self,
        old: impl AsRef<str>,
        new: impl AsRef<str>,
    ) -> PackResult<OutputId> {
        let old_path = LogicalPath::new(old);
        let new_path = LogicalPath::new(new);
        let id = *self
            .output_index
            .get(&old_path)
            .ok_or_else(|| PackError::UnknownOutputFile {
                path: old_path.to_string(),
            })?;
        if old_path == new_path {
            return Ok(id);
        }
        if self.output_index.contains_key(&new_path) {
            return Err(PackError::DuplicateOutputFile {
                path: new_path.to_string(),
            });
        }

        self.output_index.remove(&old_path);
        self.output_index.insert(new_path.clone(), id);
        self.outputs[id.0].set_logical_path(new_path);

        if let Some(written) = self.outputs[id.0].output_path().map(|p| p.to_path_buf()) {
            let target = self.physical_path(id);
            if self.fs.exists(&written) {
                self.fs
                    .rename(&written, &target)
                    .map_err(|e| PackError::fs(&written, e))?;
            }
            self.outputs[id.0].set_output_path(target);
        }

        self.logger.debug(&format!(
            "Renamed {} to {}",
            old_path,
            self.outputs[id.0].logical_path()
        ));
        Ok(id)
    }
}
