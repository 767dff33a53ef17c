//! Dependencies declared in configuration
//!
//! ```toml
//! [[visitors]]
//! type = "DeclaredDependencies"
//! config = { dependencies = { "app/main.js" = ["lib/util.js"] }, external = ["vendor/**"] }
//! ```
//!
//! A dependency that is not registered yet is looked up in the source
//! directories and registered. One that cannot be found is reported unless
//! it matches an `external` pattern.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::SourceId;
use crate::domain::ports::Visitor;
use crate::domain::value_objects::{LogicalPath, PatternList};
use crate::error::{PackError, PackResult};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeclaredDependenciesConfig {
    pub dependencies: BTreeMap<String, Vec<String>>,
    pub external: Vec<String>,
}

#[derive(Debug)]
pub struct DeclaredDependencies {
    dependencies: BTreeMap<LogicalPath, Vec<LogicalPath>>,
    external: PatternList,
}

impl DeclaredDependencies {
    pub fn new(config: DeclaredDependenciesConfig) -> PackResult<Self> {
        let mut dependencies: BTreeMap<LogicalPath, Vec<LogicalPath>> = BTreeMap::new();
        for (dependent, targets) in config.dependencies {
            dependencies
                .entry(LogicalPath::new(dependent))
                .or_default()
                .extend(targets.iter().map(LogicalPath::new));
        }
        Ok(Self {
            dependencies,
            external: PatternList::new(&config.external)?,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("DeclaredDependencies", config)?)
    }

    fn resolve(&self, packaging: &mut Packaging, path: &LogicalPath) -> PackResult<Option<SourceId>> {
        if let Some(existing) = packaging.get_source_file(path) {
            return Ok(Some(existing));
        }
        if packaging.absolute_path(path).is_some() {
            return packaging.add_source_file(path).map(Some);
        }
        Ok(None)
    }
}

impl Visitor for DeclaredDependencies {
    fn name(&self) -> &'static str {
        "DeclaredDependencies"
    }

    fn compute_dependencies(&self, packaging: &mut Packaging, source: SourceId) -> PackResult<()> {
        let path = packaging.source(source).logical_path().clone();
        let Some(targets) = self.dependencies.get(&path) else {
            return Ok(());
        };

        for target in targets {
            match self.resolve(packaging, target)? {
                Some(dependency) => {
                    packaging.add_dependency(source, dependency);
                }
                None if self.external.is_match(target.as_str()) => {}
                None => packaging.report(PackError::MissingDependency {
                    dependent: path.to_string(),
                    dependency: target.to_string(),
                })?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::packaging_with;
    use std::rc::Rc;

    fn visitor(config: &str) -> Rc<DeclaredDependencies> {
        let config: toml::Value = toml::from_str(config).unwrap();
        Rc::new(DeclaredDependencies::from_config(&config).unwrap())
    }

    #[test]
    fn registers_dependency_found_on_disk() {
        let (mut packaging, _fs) = packaging_with(&[("a.js", ""), ("lib/b.js", "")]);
        packaging.add_visitor(visitor("[dependencies]\n\"a.js\" = [\"./lib/b.js\"]"));
        let a = packaging.add_source_file("a.js").unwrap();

        let deps = packaging.dependencies(a).unwrap();

        assert_eq!(deps, vec![packaging.get_source_file("lib/b.js").unwrap()]);
    }

    #[test]
    fn missing_dependency_is_reported() {
        let (mut packaging, _fs) = packaging_with(&[("a.js", "")]);
        packaging.add_visitor(visitor("[dependencies]\n\"a.js\" = [\"gone.js\"]"));
        let a = packaging.add_source_file("a.js").unwrap();

        assert!(packaging.dependencies(a).unwrap().is_empty());
        assert!(matches!(
            packaging.errors(),
            [PackError::MissingDependency { dependency, .. }] if dependency == "gone.js"
        ));
    }

    #[test]
    fn external_dependency_is_ignored() {
        let (mut packaging, _fs) = packaging_with(&[("a.js", "")]);
        packaging.add_visitor(visitor(
            "external = [\"vendor/**\"]\n[dependencies]\n\"a.js\" = [\"vendor/jquery.js\"]",
        ));
        let a = packaging.add_source_file("a.js").unwrap();

        assert!(packaging.dependencies(a).unwrap().is_empty());
        assert_eq!(packaging.error_count(), 0);
    }

    #[test]
    fn dependencies_are_memoized() {
        let (mut packaging, fs) = packaging_with(&[("a.js", ""), ("b.js", "")]);
        packaging.add_visitor(visitor("[dependencies]\n\"a.js\" = [\"b.js\", \"c.js\"]"));
        let a = packaging.add_source_file("a.js").unwrap();

        assert_eq!(packaging.dependencies(a).unwrap().len(), 1);
        assert_eq!(packaging.error_count(), 1);

        fs.insert("src/c.js", "");
        assert_eq!(packaging.dependencies(a).unwrap().len(), 1);
        assert_eq!(packaging.error_count(), 1);
    }
}
