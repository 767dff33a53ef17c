//! TreeCodec port - parse text into a statement tree and serialize it back

use crate::domain::value_objects::{LogicalPath, SyntaxTree};
use crate::error::PackResult;

pub trait TreeCodec {
    fn name(&self) -> &'static str;

    /// Parse one source unit; `path` is only used for error messages
    fn parse(&self, text: &str, path: &LogicalPath) -> PackResult<SyntaxTree>;

    /// Serialize a complete tree
    fn serialize(&self, tree: &SyntaxTree) -> String;
}
