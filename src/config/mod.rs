//! Configuration module for Packsmith
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (PACKSMITH_*)
//! 3. Project config (`packsmith.toml`)
//! 4. Built-in defaults (lowest priority)

mod loader;
mod types;

pub use loader::{
    load_with_warnings, parse_with_warnings, with_env_overrides, ConfigWarning,
    DEFAULT_CONFIG_FILE,
};
pub use types::{Config, DescriptorConfig, PackageConfig, PackageEntry};
