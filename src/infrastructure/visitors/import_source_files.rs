//! Import files from a directory outside the source directories
//!
//! On init, every file below `source_directory` matching `source_files` is
//! registered under `target_base_logical_path`, with a loader pinned to its
//! physical path.

use std::path::PathBuf;
use std::rc::Rc;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::ports::Visitor;
use crate::domain::value_objects::{LogicalPath, PatternList};
use crate::error::{PackError, PackResult};
use crate::infrastructure::content::FileLoader;

use super::default_files;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ImportSourceFilesConfig {
    pub source_directory: PathBuf,
    pub source_files: Vec<String>,
    pub target_base_logical_path: String,
}

impl Default for ImportSourceFilesConfig {
    fn default() -> Self {
        Self {
            source_directory: PathBuf::new(),
            source_files: default_files(),
            target_base_logical_path: String::new(),
        }
    }
}

#[derive(Debug)]
pub struct ImportSourceFiles {
    source_directory: PathBuf,
    source_files: PatternList,
    target_base: LogicalPath,
}

impl ImportSourceFiles {
    pub fn new(config: ImportSourceFilesConfig) -> PackResult<Self> {
        Ok(Self {
            source_directory: config.source_directory,
            source_files: PatternList::new(&config.source_files)?,
            target_base: LogicalPath::new(&config.target_base_logical_path),
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("ImportSourceFiles", config)?)
    }
}

impl Visitor for ImportSourceFiles {
    fn name(&self) -> &'static str {
        "ImportSourceFiles"
    }

    fn on_init(&self, packaging: &mut Packaging) -> PackResult<()> {
        let root = if self.source_directory.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            self.source_directory.clone()
        };
        let files = packaging
            .fs()
            .list_files(&root)
            .map_err(|e| PackError::fs(&root, e))?;
        let relative: Vec<String> = files
            .iter()
            .map(|f| LogicalPath::from_path(f).to_string())
            .collect();

        let selected = self.source_files.expand(relative.iter().map(String::as_str));
        for file in selected {
            let logical_path = self.target_base.join(&file);
            let source = packaging.add_source_file(&logical_path)?;
            packaging.set_content_provider(source, Rc::new(FileLoader::pinned(root.join(&file))));
        }
        Ok(())
    }
}
