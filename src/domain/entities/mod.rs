//! Domain Entities
//!
//! Entities with identity inside one packaging run.
//! - `SourceFile` - a logical input file
//! - `OutputFile` - a package built from source files

mod output_file;
mod source_file;

pub use output_file::{OutputFile, OutputId};
pub use source_file::{ContentCache, SourceFile, SourceId};
