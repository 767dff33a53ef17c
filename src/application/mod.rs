//! Application Layer
//!
//! Orchestration on top of the domain:
//!
//! - `Packaging` - registries, build queue and hook dispatch
//! - `TypeRegistry` - type name to constructor factories (builders, visitors)
//! - `setup` - applying a loaded configuration to a `Packaging`

pub mod packaging;
pub mod registry;
pub mod setup;

pub use packaging::{PackageSpec, Packaging, DEFAULT_OUTPUT_DIRECTORY};
pub use registry::{empty_config, parse_config, Constructor, TypeRegistry};
pub use setup::{from_config, BuildSummary};
