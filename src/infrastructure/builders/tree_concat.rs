//! Structural concatenation
//!
//! Inputs are parsed into statement trees (reusing a tree cached on the
//! source file), each one spliced into the input wrapper, and the whole
//! body spliced into the output wrapper. Visitors see the complete tree
//! through `on_write_tree_output_file` before it is serialized once, with
//! the header and footer added around the serialized text.

use std::rc::Rc;

use serde::Deserialize;

use crate::application::{parse_config, Packaging};
use crate::domain::entities::OutputId;
use crate::domain::ports::{Builder, TreeCodec};
use crate::domain::value_objects::{LogicalPath, SyntaxTree, CONTENT_PLACEHOLDER};
use crate::error::PackResult;
use crate::infrastructure::codec::LineCodec;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TreeConcatConfig {
    pub input_wrapper: String,
    pub output_wrapper: String,
    pub header: String,
    pub footer: String,
}

impl Default for TreeConcatConfig {
    fn default() -> Self {
        Self {
            input_wrapper: CONTENT_PLACEHOLDER.to_string(),
            output_wrapper: CONTENT_PLACEHOLDER.to_string(),
            header: String::new(),
            footer: String::new(),
        }
    }
}

pub struct TreeConcat {
    codec: Rc<dyn TreeCodec>,
    input_wrapper: SyntaxTree,
    output_wrapper: SyntaxTree,
    header: String,
    footer: String,
}

impl TreeConcat {
    /// Parse the wrappers with `codec`
    pub fn new(config: TreeConcatConfig, codec: Rc<dyn TreeCodec>) -> PackResult<Self> {
        let input_wrapper = codec.parse(&config.input_wrapper, &LogicalPath::new("input_wrapper"))?;
        let output_wrapper =
            codec.parse(&config.output_wrapper, &LogicalPath::new("output_wrapper"))?;
        Ok(Self {
            codec,
            input_wrapper,
            output_wrapper,
            header: config.header,
            footer: config.footer,
        })
    }

    pub fn from_config(config: &toml::Value) -> PackResult<Self> {
        Self::new(parse_config("TreeConcat", config)?, Rc::new(LineCodec))
    }
}

impl Builder for TreeConcat {
    fn name(&self) -> &'static str {
        "TreeConcat"
    }

    fn build(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()> {
        let sources = packaging.output(output).source_files().to_vec();

        let mut body = SyntaxTree::default();
        for source in sources {
            packaging.call_visitors("on_write_input_file", |v, p| {
                v.on_write_input_file(p, output, source)
            })?;
            let tree = packaging.tree(source, self.codec.as_ref())?;
            body.extend(self.input_wrapper.clone().wrap(tree));
            packaging.clear_content(source);
        }

        let mut tree = self.output_wrapper.clone().wrap(body);
        packaging.call_visitors("on_write_tree_output_file", |v, p| {
            v.on_write_tree_output_file(p, output, &mut tree)
        })?;

        let content = format!("{}{}{}", self.header, self.codec.serialize(&tree), self.footer);
        packaging.write_output(output, content.into_bytes())
    }
}

impl std::fmt::Debug for TreeConcat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeConcat")
            .field("codec", &self.codec.name())
            .field("input_wrapper", &self.input_wrapper)
            .field("output_wrapper", &self.output_wrapper)
            .finish()
    }
}
