//! Tree codecs
//!
//! `LineCodec` is the dialect-free codec: every non-blank line is one
//! top-level statement. Dialect-aware codecs (e.g. a JavaScript parser)
//! plug in through the same `TreeCodec` port.

use crate::domain::ports::TreeCodec;
use crate::domain::value_objects::{LogicalPath, SyntaxTree};
use crate::error::PackResult;

#[derive(Debug, Clone, Copy, Default)]
pub struct LineCodec;

impl TreeCodec for LineCodec {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn parse(&self, text: &str, _path: &LogicalPath) -> PackResult<SyntaxTree> {
        Ok(SyntaxTree::new(
            text.lines()
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }

    fn serialize(&self, tree: &SyntaxTree) -> String {
        let mut out = String::new();
        for statement in tree.statements() {
            out.push_str(statement);
            out.push('\n');
        }
        out
    }
}
