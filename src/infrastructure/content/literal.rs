//! Literal in-memory content

use crate::domain::ports::{ContentProvider, ContentRequest};
use crate::error::PackResult;

/// Content given verbatim, either text or bytes.
///
/// Text content can also be read as bytes (its UTF-8 encoding); binary
/// content has no text capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Text(String),
    Binary(Vec<u8>),
}

impl Literal {
    pub fn text(text: impl Into<String>) -> Self {
        Literal::Text(text.into())
    }

    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Literal::Binary(bytes.into())
    }
}

impl ContentProvider for Literal {
    fn name(&self) -> &'static str {
        "literal"
    }

    fn read_text(&self, _request: &ContentRequest<'_>) -> Option<PackResult<String>> {
        match self {
            Literal::Text(text) => Some(Ok(text.clone())),
            Literal::Binary(_) => None,
        }
    }

    fn read_binary(&self, _request: &ContentRequest<'_>) -> Option<PackResult<Vec<u8>>> {
        match self {
            Literal::Text(text) => Some(Ok(text.clone().into_bytes())),
            Literal::Binary(bytes) => Some(Ok(bytes.clone())),
        }
    }
}
