//! Applying a configuration to a packaging
//!
//! Settings go first, so visitors see the directories when `on_init`
//! fires. Visitors are registered and initialized before any file is
//! added, then source files, then packages.

use crate::config::Config;
use crate::domain::ports::Visitor;
use crate::domain::value_objects::{Descriptor, PatternList};
use crate::error::PackResult;

use super::packaging::{PackageSpec, Packaging};

/// Configure `packaging` from `config`
pub fn from_config(packaging: &mut Packaging, config: &Config) -> PackResult<()> {
    packaging.set_default_builder(config.default_builder.as_ref().map(|d| d.to_descriptor()));
    packaging.set_source_directories(config.source_directories.clone());
    packaging.set_output_directory(config.output_directory.clone());
    packaging.set_fail_fast(config.fail_fast);

    let visitors: Vec<Descriptor<dyn Visitor>> =
        config.visitors.iter().map(|d| d.to_descriptor()).collect();
    packaging.add_visitors(&visitors)?;
    packaging.init()?;

    if !config.source_files.is_empty() {
        packaging.add_source_files(&PatternList::new(&config.source_files)?)?;
    }

    let packages: Vec<PackageSpec> = config
        .package_list()
        .into_iter()
        .map(|package| package.to_spec())
        .collect();
    packaging.add_packages(&packages)?;
    Ok(())
}

/// Outcome of a build
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Output files built
    pub packages: usize,
    /// Errors recorded during the run
    pub errors: usize,
}

impl BuildSummary {
    pub fn of(packaging: &Packaging) -> Self {
        Self {
            packages: packaging
                .output_ids()
                .into_iter()
                .filter(|&id| packaging.output(id).is_finished())
                .count(),
            errors: packaging.error_count(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors == 0
    }
}
