//! Graphviz dump of the dependency graph
//!
//! At the end of the build, writes a `digraph` with one node per matching
//! source file and one edge per dependency between matching files.
//! Dependencies are emitted before their dependents.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::SourceId;
use crate::domain::ports::Visitor;
use crate::domain::value_objects::PatternList;
use crate::error::{PackError, PackResult};

use super::default_files;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DependenciesGraphConfig {
    pub source_files: Vec<String>,
    pub graph_file: String,
    /// Defaults to the packaging output directory
    pub output_directory: Option<PathBuf>,
}

impl Default for DependenciesGraphConfig {
    fn default() -> Self {
        Self {
            source_files: default_files(),
            graph_file: "dependencies.gv".to_string(),
            output_directory: None,
        }
    }
}

#[derive(Debug)]
pub struct DependenciesGraph {
    source_files: PatternList,
    graph_file: String,
    output_directory: Option<PathBuf>,
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\\\""))
}

struct GraphWriter<'a> {
    patterns: &'a PatternList,
    included: HashMap<SourceId, bool>,
    out: String,
}

impl GraphWriter<'_> {
    fn visit(&mut self, packaging: &mut Packaging, source: SourceId) -> PackResult<bool> {
        if let Some(&included) = self.included.get(&source) {
            return Ok(included);
        }
        if !packaging.source_matches(source, self.patterns) {
            self.included.insert(source, false);
            return Ok(false);
        }
        self.included.insert(source, true);

        let mut edges = Vec::new();
        for dependency in packaging.dependencies(source)? {
            if self.visit(packaging, dependency)? {
                edges.push(dependency);
            }
        }

        let name = quote(packaging.source(source).logical_path().as_str());
        self.out.push_str(&format!("{name};\n"));
        for dependency in edges {
            let target = quote(packaging.source(dependency).logical_path().as_str());
            self.out.push_str(&format!("{name} -> {target};\n"));
        }
        Ok(true)
    }
}

impl DependenciesGraph {
    pub fn new(config: DependenciesGraphConfig) -> PackResult<Self> {
        Ok(Self {
            source_files: PatternList::new(&config.source_files)?,
            graph_file: config.graph_file,
            output_directory: config.output_directory,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("DependenciesGraph", config)?)
    }

    /// Render the graph of every registered source file
    pub fn render(&self, packaging: &mut Packaging) -> PackResult<String> {
        let mut writer = GraphWriter {
            patterns: &self.source_files,
            included: HashMap::new(),
            out: String::from("digraph dependencies {\n"),
        };
        for source in packaging.source_ids() {
            writer.visit(packaging, source)?;
        }
        writer.out.push_str("}\n");
        Ok(writer.out)
    }
}

impl Visitor for DependenciesGraph {
    fn name(&self) -> &'static str {
        "DependenciesGraph"
    }

    fn on_after_build(&self, packaging: &mut Packaging) -> PackResult<()> {
        let content = self.render(packaging)?;
        let path = self
            .output_directory
            .clone()
            .unwrap_or_else(|| packaging.output_directory().to_path_buf())
            .join(&self.graph_file);
        packaging
            .fs()
            .write(&path, content.as_bytes())
            .map_err(|e| PackError::fs(&path, e))
    }
}
