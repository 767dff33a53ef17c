//! Content-hashed file names
//!
//! After a matching output file is built, its content is hashed (`md5` by
//! default, or `sha1` / `sha256`) and the file is renamed following
//! `pattern`, where `[name]`, `[hash]` and `[extension]` are substituted
//! (case-insensitively).

use md5::Md5;
use regex::{Captures, Regex};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use crate::application::{parse_config, Packaging};
use crate::domain::entities::OutputId;
use crate::domain::ports::Visitor;
use crate::domain::value_objects::{LogicalPath, PatternList};
use crate::error::{PackError, PackResult};

use super::default_files;

pub const DEFAULT_PATTERN: &str = "[name]-[hash][extension]";

const PLACEHOLDER: &str = r"(?i)\[(name|hash|extension)\]";

/// Digest used for the file name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
}

impl HashAlgorithm {
    /// Lowercase hex digest of `content`
    pub fn hex_digest(self, content: &[u8]) -> String {
        match self {
            HashAlgorithm::Md5 => format!("{:x}", Md5::digest(content)),
            HashAlgorithm::Sha1 => format!("{:x}", Sha1::digest(content)),
            HashAlgorithm::Sha256 => format!("{:x}", Sha256::digest(content)),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HashConfig {
    pub files: Vec<String>,
    pub pattern: String,
    pub hash: HashAlgorithm,
    /// Keep only the first `length` hex digits
    pub length: Option<usize>,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            pattern: DEFAULT_PATTERN.to_string(),
            hash: HashAlgorithm::default(),
            length: None,
        }
    }
}

#[derive(Debug)]
pub struct Hash {
    files: PatternList,
    pattern: String,
    placeholder: Regex,
    hash: HashAlgorithm,
    length: Option<usize>,
}

impl Hash {
    pub fn new(config: HashConfig) -> PackResult<Self> {
        Ok(Self {
            files: PatternList::new(&config.files)?,
            pattern: config.pattern,
            placeholder: Regex::new(PLACEHOLDER).map_err(|e| PackError::InvalidConfig {
                name: "Hash".to_string(),
                message: e.to_string(),
            })?,
            hash: config.hash,
            length: config.length,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("Hash", config)?)
    }

    fn digest(&self, content: &[u8]) -> String {
        let mut hex = self.hash.hex_digest(content);
        if let Some(length) = self.length {
            hex.truncate(length);
        }
        hex
    }

    /// Apply the pattern to the file name of `path`, keeping its directory
    pub fn hashed_name(&self, path: &LogicalPath, hash: &str) -> LogicalPath {
        let file_name = path.file_name();
        let (name, extension) = match file_name.rfind('.') {
            Some(idx) if idx > 0 => file_name.split_at(idx),
            _ => (file_name, ""),
        };
        let new_name = self
            .placeholder
            .replace_all(&self.pattern, |caps: &Captures<'_>| {
                match caps[1].to_ascii_lowercase().as_str() {
                    "name" => name,
                    "hash" => hash,
                    _ => extension,
                }
                .to_string()
            });
        LogicalPath::new(path.parent()).join(new_name)
    }
}

impl Visitor for Hash {
    fn name(&self) -> &'static str {
        "Hash"
    }

    fn on_after_output_file_build(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
    ) -> PackResult<()> {
        if !packaging.output_matches(output, &self.files) {
            return Ok(());
        }
        let physical = packaging.physical_path(output);
        let content = packaging
            .fs()
            .read(&physical)
            .map_err(|e| PackError::fs(&physical, e))?;

        let old = packaging.output(output).logical_path().clone();
        let new = self.hashed_name(&old, &self.digest(&content));
        packaging.rename_output_file(&old, &new)?;
        Ok(())
    }
}
