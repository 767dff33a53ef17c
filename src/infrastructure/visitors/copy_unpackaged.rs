//! Give every unpackaged source file its own output file
//!
//! Runs each time the build queue runs empty, so files adopted by no
//! package are still written (copied by default).

use std::rc::Rc;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::config::DescriptorConfig;
use crate::domain::ports::{Builder, Visitor};
use crate::domain::value_objects::{Descriptor, PatternList};
use crate::error::PackResult;

use super::default_files;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyUnpackagedConfig {
    pub files: Vec<String>,
    pub builder: DescriptorConfig,
}

impl Default for CopyUnpackagedConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            builder: DescriptorConfig::Name("Copy".to_string()),
        }
    }
}

pub struct CopyUnpackaged {
    files: PatternList,
    builder: Descriptor<dyn Builder>,
}

impl CopyUnpackaged {
    pub fn new(config: CopyUnpackagedConfig) -> PackResult<Self> {
        Ok(Self {
            files: PatternList::new(&config.files)?,
            builder: config.builder.into_descriptor(),
        })
    }

    /// Use a ready-made builder for the created output files
    pub fn with_builder(files: PatternList, builder: Rc<dyn Builder>) -> Self {
        Self {
            files,
            builder: Descriptor::instance(builder),
        }
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("CopyUnpackaged", config)?)
    }
}

impl Visitor for CopyUnpackaged {
    fn name(&self) -> &'static str {
        "CopyUnpackaged"
    }

    fn on_reaching_build_end(&self, packaging: &mut Packaging) -> PackResult<()> {
        for source in packaging.source_ids() {
            if packaging.source(source).output_file().is_some()
                || !packaging.source_matches(source, &self.files)
            {
                continue;
            }
            let path = packaging.source(source).logical_path().clone();
            let output = packaging.add_output_file(&path, true)?;
            let builder = packaging.create_builder(&self.builder)?;
            packaging.set_builder(output, builder);
            packaging.set_output_file(source, Some(output));
        }
        Ok(())
    }
}

impl std::fmt::Debug for CopyUnpackaged {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopyUnpackaged")
            .field("files", &self.files)
            .field("builder", &self.builder)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PackError;
    use crate::testing::packaging_with;

    #[test]
    fn copies_leftovers_after_packages() {
        let (mut packaging, fs) = packaging_with(&[("a.js", "a"), ("img/b.png", "png")]);
        packaging.add_visitor(Rc::new(
            CopyUnpackaged::from_config(&crate::application::empty_config()).unwrap(),
        ));
        packaging.add_source_file("a.js").unwrap();
        packaging.add_source_file("img/b.png").unwrap();

        packaging.build().unwrap();

        assert_eq!(fs.get_string("out/a.js").as_deref(), Some("a"));
        assert_eq!(fs.get_string("out/img/b.png").as_deref(), Some("png"));
        assert_eq!(packaging.error_count(), 0);
    }

    #[test]
    fn respects_file_patterns() {
        let (mut packaging, fs) = packaging_with(&[("a.js", "a"), ("b.txt", "b")]);
        let config: toml::Value = toml::from_str("files = [\"*.txt\"]").unwrap();
        packaging.add_visitor(Rc::new(CopyUnpackaged::from_config(&config).unwrap()));
        packaging.add_source_file("a.js").unwrap();
        packaging.add_source_file("b.txt").unwrap();

        packaging.build().unwrap();

        assert!(fs.get_string("out/a.js").is_none());
        assert_eq!(fs.get_string("out/b.txt").as_deref(), Some("b"));
    }

    #[test]
    fn existing_output_with_same_path_aborts() {
        let (mut packaging, _fs) = packaging_with(&[("a.js", "a")]);
        packaging.add_visitor(Rc::new(
            CopyUnpackaged::from_config(&crate::application::empty_config()).unwrap(),
        ));
        packaging.add_source_file("a.js").unwrap();
        packaging.add_output_file("a.js", false).unwrap();
        packaging.set_default_builder(Some(Descriptor::named("Concat")));

        let err = packaging.build().unwrap_err();

        assert!(matches!(err, PackError::DuplicateOutputFile { .. }));
    }
}
