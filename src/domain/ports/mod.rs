//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod builder;
pub mod compiler;
pub mod content_provider;
pub mod file_system;
pub mod logger;
pub mod tree_codec;
pub mod visitor;

pub use builder::Builder;
pub use compiler::{CompileError, Compiler};
pub use content_provider::{ContentProvider, ContentRequest};
pub use file_system::{FileSystem, FsError, FsResult};
pub use logger::{Logger, NoopLogger};
pub use tree_codec::TreeCodec;
pub use visitor::Visitor;
