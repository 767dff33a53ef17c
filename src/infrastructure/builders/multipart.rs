//! Multipart concatenation
//!
//! A concatenation that can be split back into its input files: when a
//! package holds other than exactly one file, a `//***MULTI-PART` marker
//! follows the header and every input is preceded by
//!
//! ```text
//!
//! //<boundary>
//! //LOGICAL-PATH:<logical path>
//! //<boundary>
//! ```

use serde::Deserialize;

use crate::application::parse_config;
use crate::domain::value_objects::LogicalPath;
use crate::error::PackResult;

use super::concat::{Concat, ConcatConfig, Framing};

/// Boundary used when none is configured
pub const DEFAULT_BOUNDARY: &str = "*******************";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MultipartConfig {
    pub header: String,
    pub footer: String,
    pub binary: bool,
    /// Separator line; must not appear in any packaged file
    pub boundary: Option<String>,
}

#[derive(Debug, Clone)]
pub struct MultipartFraming {
    boundary: String,
}

impl MultipartFraming {
    pub fn new(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
        }
    }
}

impl Framing for MultipartFraming {
    fn name(&self) -> &'static str {
        "Multipart"
    }

    fn after_header(&self, input_count: usize, out: &mut Vec<u8>) {
        if input_count != 1 {
            out.extend_from_slice(b"//***MULTI-PART");
        }
    }

    fn before_input(&self, input_count: usize, path: &LogicalPath, out: &mut Vec<u8>) {
        if input_count != 1 {
            let separator = format!(
                "\n//{boundary}\n//LOGICAL-PATH:{path}\n//{boundary}\n",
                boundary = self.boundary,
            );
            out.extend_from_slice(separator.as_bytes());
        }
    }
}

/// Concat builder with multipart framing
pub fn multipart(config: MultipartConfig) -> Concat {
    let boundary = config
        .boundary
        .filter(|b| !b.is_empty())
        .unwrap_or_else(|| DEFAULT_BOUNDARY.to_string());
    Concat::with_framing(
        ConcatConfig {
            header: config.header,
            footer: config.footer,
            binary: config.binary,
        },
        Box::new(MultipartFraming::new(boundary)),
    )
}

pub fn from_config(config: &toml::Value) -> PackResult<Concat> {
    Ok(multipart(parse_config("Multipart", config)?))
}
