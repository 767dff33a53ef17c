//! Domain Layer
//!
//! This is the core of Packsmith - data and algorithms without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Source and output files
//! - `value_objects/` - Logical paths, pattern lists, descriptors, syntax trees
//! - `services/` - Dependency resolution
//! - `ports/` - Interface definitions for infrastructure and plugins
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - All I/O goes through trait-defined ports
//! 3. **Ids over references** - Entities point at each other through ids
//!    owned by the packaging arena

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
