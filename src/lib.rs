//! Packsmith - dependency-ordered asset packager
//!
//! Packsmith groups logical source files into output packages, orders the
//! files of each package by their dependencies, and writes the packages with
//! pluggable builders. Visitors hook into every step of the build to add
//! files, compute dependencies, transform content or emit side artifacts.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod testing;

// Re-exports for convenience
pub use application::{from_config, BuildSummary, PackageSpec, Packaging};
pub use config::{Config, ConfigWarning, DescriptorConfig};
pub use domain::entities::{OutputId, SourceId};
pub use domain::ports::{Builder, FileSystem, Logger, Visitor};
pub use domain::value_objects::{Descriptor, LogicalPath, PatternList};
pub use error::{ErrorClass, PackError, PackResult};
pub use infrastructure::{LocalFs, MemoryFs, TracingLogger};
