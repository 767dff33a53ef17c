//! Source-to-package map
//!
//! At the end of the build, writes a JSON object mapping each packaged
//! source file to the output file containing it, e.g.
//! `{"app/a.js":"app-4f2a.js"}`. Keys are normalized logical paths, so
//! every source file has at most one entry.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::ports::Visitor;
use crate::domain::value_objects::PatternList;
use crate::error::{PackError, PackResult};

use super::default_files;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MapConfig {
    pub source_files: Vec<String>,
    pub output_files: Vec<String>,
    pub map_file: String,
    /// Defaults to the packaging output directory
    pub output_directory: Option<PathBuf>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            source_files: default_files(),
            output_files: default_files(),
            map_file: "map.json".to_string(),
            output_directory: None,
        }
    }
}

#[derive(Debug)]
pub struct Map {
    source_files: PatternList,
    output_files: PatternList,
    map_file: String,
    output_directory: Option<PathBuf>,
}

impl Map {
    pub fn new(config: MapConfig) -> PackResult<Self> {
        Ok(Self {
            source_files: PatternList::new(&config.source_files)?,
            output_files: PatternList::new(&config.output_files)?,
            map_file: config.map_file,
            output_directory: config.output_directory,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("Map", config)?)
    }
}

impl Visitor for Map {
    fn name(&self) -> &'static str {
        "Map"
    }

    fn on_after_build(&self, packaging: &mut Packaging) -> PackResult<()> {
        let mut map: BTreeMap<String, String> = BTreeMap::new();

        for source in packaging.source_ids() {
            let Some(output) = packaging.source(source).output_file() else {
                continue;
            };
            if !packaging.source_matches(source, &self.source_files)
                || !packaging.output_matches(output, &self.output_files)
            {
                continue;
            }
            map.insert(
                packaging.source(source).logical_path().to_string(),
                packaging.output(output).logical_path().to_string(),
            );
        }

        let path = self
            .output_directory
            .clone()
            .unwrap_or_else(|| packaging.output_directory().to_path_buf())
            .join(&self.map_file);
        let content = serde_json::to_string(&map)?;
        packaging
            .fs()
            .write(&path, content.as_bytes())
            .map_err(|e| PackError::fs(&path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::PackageSpec;
    use crate::domain::value_objects::Descriptor;
    use crate::testing::packaging_with;
    use std::rc::Rc;

    #[test]
    fn maps_packaged_sources() {
        let (mut packaging, fs) = packaging_with(&[
            ("app/a.js", "a"),
            ("app/b.js", "b"),
            ("lone.txt", "t"),
        ]);
        let config: toml::Value = toml::from_str("output_files = [\"*.js\"]").unwrap();
        packaging.add_visitor(Rc::new(Map::from_config(&config).unwrap()));
        packaging.set_default_builder(Some(Descriptor::named("Concat")));
        packaging
            .add_package(&PackageSpec::new("app.js").with_files(["app/**"]))
            .unwrap();
        packaging
            .add_package(&PackageSpec::new("lone.txt").with_files(["lone.txt"]))
            .unwrap();

        packaging.build().unwrap();

        insta::assert_snapshot!(
            fs.get_string("out/map.json").unwrap(),
            @r#"{"app/a.js":"app.js","app/b.js":"app.js"}"#
        );
    }
}
