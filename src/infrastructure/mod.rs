//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, Memory)
//! - `content/` - Content providers (disk loader, literal content)
//! - `builders/` - Built-in builders
//! - `visitors/` - Built-in visitors
//! - `codec` - Line-based tree codec
//! - `logging` - `tracing` backed logger

pub mod builders;
pub mod codec;
pub mod content;
pub mod fs;
pub mod logging;
pub mod visitors;

// Re-export for convenience
pub use codec::LineCodec;
pub use content::{FileLoader, Literal};
pub use fs::{LocalFs, MemoryFs};
pub use logging::TracingLogger;
