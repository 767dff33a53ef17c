//! Configuration type definitions

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::application::{empty_config, PackageSpec, DEFAULT_OUTPUT_DIRECTORY};
use crate::domain::value_objects::Descriptor;
use crate::error::PackResult;

use super::loader::{self, ConfigWarning};

/// A builder or visitor as written in a config file.
///
/// Either a bare type name:
///   default_builder = "Concat"
///
/// Or a type name with its config table:
///   default_builder = { type = "Concat", config = { header = "/*!*/" } }
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged, deny_unknown_fields)]
pub enum DescriptorConfig {
    Name(String),
    Typed {
        #[serde(rename = "type")]
        type_name: String,
        #[serde(default = "empty_config")]
        config: toml::Value,
    },
}

impl DescriptorConfig {
    pub fn into_descriptor<T: ?Sized>(self) -> Descriptor<T> {
        match self {
            DescriptorConfig::Name(name) => Descriptor::named(name),
            DescriptorConfig::Typed { type_name, config } => Descriptor::typed(type_name, config),
        }
    }

    pub fn to_descriptor<T: ?Sized>(&self) -> Descriptor<T> {
        self.clone().into_descriptor()
    }

    /// Type name the descriptor refers to
    pub fn type_name(&self) -> &str {
        match self {
            DescriptorConfig::Name(name) | DescriptorConfig::Typed { type_name: name, .. } => name,
        }
    }
}

/// One package table
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PackageConfig {
    pub name: String,

    #[serde(default)]
    pub builder: Option<DescriptorConfig>,

    #[serde(default)]
    pub files: Vec<String>,
}

impl PackageConfig {
    pub fn to_spec(&self) -> PackageSpec {
        PackageSpec {
            name: self.name.clone(),
            builder: self.builder.as_ref().map(DescriptorConfig::to_descriptor),
            files: self.files.clone(),
        }
    }
}

/// Entry of the `packages` array: a package, or a nested list of entries
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PackageEntry {
    Package(PackageConfig),
    List(Vec<PackageEntry>),
}

impl PackageEntry {
    fn flatten_into<'a>(&'a self, out: &mut Vec<&'a PackageConfig>) {
        match self {
            PackageEntry::Package(package) => out.push(package),
            PackageEntry::List(entries) => {
                for entry in entries {
                    entry.flatten_into(out);
                }
            }
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source_directories: Vec<PathBuf>,

    #[serde(default = "default_output_directory")]
    pub output_directory: PathBuf,

    /// Patterns registered as source files before packages are added
    #[serde(default)]
    pub source_files: Vec<String>,

    #[serde(default)]
    pub default_builder: Option<DescriptorConfig>,

    #[serde(default)]
    pub fail_fast: bool,

    #[serde(default)]
    pub visitors: Vec<DescriptorConfig>,

    #[serde(default)]
    pub packages: Vec<PackageEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_directories: Vec::new(),
            output_directory: default_output_directory(),
            source_files: Vec::new(),
            default_builder: None,
            fail_fast: false,
            visitors: Vec::new(),
            packages: Vec::new(),
        }
    }
}

fn default_output_directory() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> PackResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> PackResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Apply environment variable overrides (PACKSMITH_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    /// Every package, nested lists flattened in order
    pub fn package_list(&self) -> Vec<&PackageConfig> {
        let mut out = Vec::new();
        for entry in &self.packages {
            entry.flatten_into(&mut out);
        }
        out
    }

    /// Relative paths are resolved against `base` (the config file's directory)
    pub fn rebase(mut self, base: &Path) -> Self {
        for dir in &mut self.source_directories {
            if dir.is_relative() {
                *dir = base.join(&*dir);
            }
        }
        if self.output_directory.is_relative() {
            self.output_directory = base.join(&self.output_directory);
        }
        self
    }
}
