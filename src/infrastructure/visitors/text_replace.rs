//! Find/replace on input files as they are packaged
//!
//! Each replacement's `find` is a literal string, or a regular expression
//! when `regex = true` (the replacement may then use `$1` / `${name}`).
//! Only the first match is replaced unless `all = true`.

use regex::{NoExpand, Regex};
use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::{OutputId, SourceId};
use crate::domain::ports::Visitor;
use crate::domain::value_objects::PatternList;
use crate::error::{PackError, PackResult};

use super::default_files;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Replacement {
    pub find: String,
    pub replace: String,
    #[serde(default)]
    pub regex: bool,
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextReplaceConfig {
    pub files: Vec<String>,
    pub replacements: Vec<Replacement>,
}

impl Default for TextReplaceConfig {
    fn default() -> Self {
        Self {
            files: default_files(),
            replacements: Vec::new(),
        }
    }
}

/// A replacement with its pattern compiled
#[derive(Debug)]
struct Rule {
    find: Regex,
    replace: String,
    expand: bool,
    limit: usize,
}

impl Rule {
    fn compile(entry: Replacement) -> PackResult<Self> {
        let source = if entry.regex {
            entry.find
        } else {
            regex::escape(&entry.find)
        };
        let find = Regex::new(&source).map_err(|e| PackError::InvalidConfig {
            name: "TextReplace".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            find,
            replace: entry.replace,
            expand: entry.regex,
            // 0 means every match
            limit: if entry.all { 0 } else { 1 },
        })
    }

    fn apply(&self, text: &str) -> String {
        if self.expand {
            self.find
                .replacen(text, self.limit, self.replace.as_str())
                .into_owned()
        } else {
            self.find
                .replacen(text, self.limit, NoExpand(&self.replace))
                .into_owned()
        }
    }
}

#[derive(Debug)]
pub struct TextReplace {
    files: PatternList,
    rules: Vec<Rule>,
}

impl TextReplace {
    pub fn new(config: TextReplaceConfig) -> PackResult<Self> {
        let rules = config
            .replacements
            .into_iter()
            .filter(|entry| !entry.find.is_empty())
            .map(Rule::compile)
            .collect::<PackResult<Vec<_>>>()?;
        Ok(Self {
            files: PatternList::new(&config.files)?,
            rules,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("TextReplace", config)?)
    }
}

impl Visitor for TextReplace {
    fn name(&self) -> &'static str {
        "TextReplace"
    }

    fn on_write_input_file(
        &self,
        packaging: &mut Packaging,
        _output: OutputId,
        source: SourceId,
    ) -> PackResult<()> {
        if !packaging.source_matches(source, &self.files) {
            return Ok(());
        }
        let mut text = packaging.text_content(source)?;
        for rule in &self.rules {
            text = rule.apply(&text);
        }
        packaging.set_text_content(source, text);
        Ok(())
    }
}
