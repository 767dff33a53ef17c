//! Dependency check before each output file is built
//!
//! Runs the dependency resolver on matching output files: cycles,
//! cross-package ordering and unassigned dependencies are reported, missing
//! dependencies are adopted when allowed, and the files are reordered so
//! that dependencies come first.

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::OutputId;
use crate::domain::ports::Visitor;
use crate::domain::services::{DependencyResolver, ResolverOptions};
use crate::domain::value_objects::PatternList;
use crate::error::PackResult;

use super::default_files;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckDependenciesConfig {
    pub files: Vec<String>,
    pub detect_cycles: bool,
    pub auto_adopt_unassigned: bool,
    pub error_on_unassigned: bool,
    pub enforce_cross_package_order: bool,
    pub reorder: bool,
}

impl Default for CheckDependenciesConfig {
    fn default() -> Self {
        let options = ResolverOptions::default();
        Self {
            files: default_files(),
            detect_cycles: options.detect_cycles,
            auto_adopt_unassigned: options.auto_adopt_unassigned,
            error_on_unassigned: options.error_on_unassigned,
            enforce_cross_package_order: options.enforce_cross_package_order,
            reorder: options.reorder,
        }
    }
}

#[derive(Debug)]
pub struct CheckDependencies {
    files: PatternList,
    resolver: DependencyResolver,
}

impl CheckDependencies {
    pub fn new(config: CheckDependenciesConfig) -> PackResult<Self> {
        Ok(Self {
            files: PatternList::new(&config.files)?,
            resolver: DependencyResolver::new(ResolverOptions {
                detect_cycles: config.detect_cycles,
                auto_adopt_unassigned: config.auto_adopt_unassigned,
                error_on_unassigned: config.error_on_unassigned,
                enforce_cross_package_order: config.enforce_cross_package_order,
                reorder: config.reorder,
            }),
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("CheckDependencies", config)?)
    }
}

impl Visitor for CheckDependencies {
    fn name(&self) -> &'static str {
        "CheckDependencies"
    }

    fn on_before_output_file_build(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
    ) -> PackResult<()> {
        if !packaging.output_matches(output, &self.files) {
            return Ok(());
        }

        let sources = packaging.output(output).source_files().to_vec();
        let resolution = self.resolver.resolve(packaging, output, &sources)?;

        for problem in resolution.problems {
            packaging.report(problem)?;
        }
        if self.resolver.options().reorder {
            packaging.set_source_order(output, resolution.order);
        }
        Ok(())
    }
}
