//! Visitor port - plugin hooks at fixed orchestration points
//!
//! Every hook is optional: the default does nothing. Hooks run in visitor
//! registration order and receive the packaging first. An `Err` returned
//! from a hook aborts the whole run; problems that should only be counted
//! go through `Packaging::report` instead.
//!
//! Hooks take `&self`: the same visitor can be re-entered (e.g. a
//! `compute_dependencies` fired from inside `on_before_output_file_build`),
//! so visitors needing state keep it behind a `Cell`/`RefCell`.

use crate::application::Packaging;
use crate::domain::entities::{OutputId, SourceId};
use crate::domain::value_objects::SyntaxTree;
use crate::error::PackResult;

#[allow(unused_variables)]
pub trait Visitor {
    /// Type name used in diagnostics
    fn name(&self) -> &'static str;

    /// After all visitors are registered, before files and packages are added
    fn on_init(&self, packaging: &mut Packaging) -> PackResult<()> {
        Ok(())
    }

    /// A source file was registered
    fn on_add_source_file(&self, packaging: &mut Packaging, source: SourceId) -> PackResult<()> {
        Ok(())
    }

    /// An output file was registered and queued
    fn on_add_output_file(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()> {
        Ok(())
    }

    /// Add the dependencies of `source` with `Packaging::add_dependency`
    fn compute_dependencies(
        &self,
        packaging: &mut Packaging,
        source: SourceId,
    ) -> PackResult<()> {
        Ok(())
    }

    /// Start of `Packaging::build`
    fn on_before_build(&self, packaging: &mut Packaging) -> PackResult<()> {
        Ok(())
    }

    /// The output file's builder and physical path are known; nothing written yet
    fn on_before_output_file_build(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
    ) -> PackResult<()> {
        Ok(())
    }

    /// A builder is about to read `source` for `output`
    fn on_write_input_file(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
        source: SourceId,
    ) -> PackResult<()> {
        Ok(())
    }

    /// A structural builder is about to serialize the whole tree of `output`
    fn on_write_tree_output_file(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
        tree: &mut SyntaxTree,
    ) -> PackResult<()> {
        Ok(())
    }

    /// A builder is about to write `content` to the physical path of `output`
    fn on_write_output_file(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
        content: &mut Vec<u8>,
    ) -> PackResult<()> {
        Ok(())
    }

    /// `output` was built
    fn on_after_output_file_build(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
    ) -> PackResult<()> {
        Ok(())
    }

    /// The build queue became empty; queueing more output files resumes the build
    fn on_reaching_build_end(&self, packaging: &mut Packaging) -> PackResult<()> {
        Ok(())
    }

    /// End of `Packaging::build`
    fn on_after_build(&self, packaging: &mut Packaging) -> PackResult<()> {
        Ok(())
    }
}
