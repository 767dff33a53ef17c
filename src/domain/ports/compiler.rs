//! Compiler port - opaque external compilation service
//!
//! Dialect-specific compilation (templates, resource files...) happens
//! outside the packager. The packager only hands over the source text and
//! takes back the compiled text.

use std::fmt;

/// Failure reported by a compiler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileError {
    pub message: String,
    pub line: Option<usize>,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {}: {}", line, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CompileError {}

pub trait Compiler {
    /// Compile `source` of the given `kind` found at `logical_path`
    fn compile(&self, kind: &str, source: &str, logical_path: &str) -> Result<String, CompileError>;
}
