//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod descriptor;
mod logical_path;
mod pattern;
mod syntax_tree;

pub use descriptor::{Descriptor, DescriptorSpec};
pub use logical_path::LogicalPath;
pub use pattern::PatternList;
pub use syntax_tree::{SyntaxTree, CONTENT_PLACEHOLDER};
