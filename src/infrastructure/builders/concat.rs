//! Concatenation builder
//!
//! Writes the header, then each input file in package order, then the
//! footer. Variants (such as the multipart format) change the framing
//! around the inputs through a `Framing` strategy instead of subclassing.

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::OutputId;
use crate::domain::ports::Builder;
use crate::domain::value_objects::LogicalPath;
use crate::error::PackResult;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConcatConfig {
    pub header: String,
    pub footer: String,
    /// Concatenate raw bytes instead of text
    pub binary: bool,
}

/// Extra bytes written around the inputs of a concatenation
#[allow(unused_variables)]
pub trait Framing {
    /// Builder name reported in diagnostics
    fn name(&self) -> &'static str;

    /// Written right after the header
    fn after_header(&self, input_count: usize, out: &mut Vec<u8>) {}

    /// Written before the content of each input file
    fn before_input(&self, input_count: usize, path: &LogicalPath, out: &mut Vec<u8>) {}
}

/// No framing: plain concatenation
#[derive(Debug, Clone, Copy, Default)]
pub struct Plain;

impl Framing for Plain {
    fn name(&self) -> &'static str {
        "Concat"
    }
}

pub struct Concat {
    config: ConcatConfig,
    framing: Box<dyn Framing>,
}

impl Concat {
    pub fn new(config: ConcatConfig) -> Self {
        Self::with_framing(config, Box::new(Plain))
    }

    pub fn with_framing(config: ConcatConfig, framing: Box<dyn Framing>) -> Self {
        Self { config, framing }
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Ok(Self::new(parse_config("Concat", config)?))
    }

    pub fn config(&self) -> &ConcatConfig {
        &self.config
    }
}

impl Builder for Concat {
    fn name(&self) -> &'static str {
        self.framing.name()
    }

    fn build(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()> {
        let sources = packaging.output(output).source_files().to_vec();
        let count = sources.len();

        let mut out = self.config.header.as_bytes().to_vec();
        self.framing.after_header(count, &mut out);

        for source in sources {
            packaging.call_visitors("on_write_input_file", |v, p| {
                v.on_write_input_file(p, output, source)
            })?;
            self.framing
                .before_input(count, packaging.source(source).logical_path(), &mut out);
            if self.config.binary {
                out.extend(packaging.binary_content(source)?);
            } else {
                out.extend(packaging.text_content(source)?.into_bytes());
            }
            packaging.clear_content(source);
        }

        out.extend_from_slice(self.config.footer.as_bytes());
        packaging.write_output(output, out)
    }
}

impl std::fmt::Debug for Concat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Concat")
            .field("framing", &self.framing.name())
            .field("config", &self.config)
            .finish()
    }
}
