//! Built-in Visitors
//!
//! Every visitor except `CompileSources` can be created by type name from
//! configuration:
//!
//! - `CheckDependencies` - validate and reorder packages before building
//! - `DeclaredDependencies` - dependency edges from a config table
//! - `ImportSourceFiles` - register files from an extra directory
//! - `CopyUnpackaged` - one output file per leftover source file
//! - `TextReplace` - literal or regex substitutions in packaged files
//! - `Hash` - content-hashed output names
//! - `Map` - JSON map of source file to output file
//! - `DependenciesGraph` - Graphviz dump of the dependency graph

mod check_dependencies;
mod compile_sources;
mod copy_unpackaged;
mod declared_dependencies;
mod dependencies_graph;
mod hash;
mod import_source_files;
mod map;
mod text_replace;

use std::rc::Rc;

pub use check_dependencies::{CheckDependencies, CheckDependenciesConfig};
pub use compile_sources::CompileSources;
pub use copy_unpackaged::{CopyUnpackaged, CopyUnpackagedConfig};
pub use declared_dependencies::{DeclaredDependencies, DeclaredDependenciesConfig};
pub use dependencies_graph::{DependenciesGraph, DependenciesGraphConfig};
pub use hash::{Hash, HashAlgorithm, HashConfig, DEFAULT_PATTERN};
pub use import_source_files::{ImportSourceFiles, ImportSourceFilesConfig};
pub use map::{Map, MapConfig};
pub use text_replace::{Replacement, TextReplace, TextReplaceConfig};

use crate::application::TypeRegistry;
use crate::domain::ports::Visitor;

/// Patterns used when a visitor is given no `files`
pub(crate) fn default_files() -> Vec<String> {
    vec!["**/*".to_string()]
}

/// Registry holding every configurable built-in visitor type
pub fn builtin_registry() -> TypeRegistry<dyn Visitor> {
    let mut registry: TypeRegistry<dyn Visitor> = TypeRegistry::new("visitor");
    registry.register("CheckDependencies", |config| {
        Ok(Rc::new(CheckDependencies::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("DeclaredDependencies", |config| {
        Ok(Rc::new(DeclaredDependencies::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("ImportSourceFiles", |config| {
        Ok(Rc::new(ImportSourceFiles::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("CopyUnpackaged", |config| {
        Ok(Rc::new(CopyUnpackaged::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("TextReplace", |config| {
        Ok(Rc::new(TextReplace::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("Hash", |config| {
        Ok(Rc::new(Hash::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("Map", |config| {
        Ok(Rc::new(Map::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry.register("DependenciesGraph", |config| {
        Ok(Rc::new(DependenciesGraph::from_config(config)?) as Rc<dyn Visitor>)
    });
    registry
}
