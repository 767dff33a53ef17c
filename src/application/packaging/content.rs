//! Source file content: provider delegation and derived-content cache

use std::rc::Rc;

use crate::domain::entities::SourceId;
use crate::domain::ports::{ContentProvider, ContentRequest, TreeCodec};
use crate::domain::value_objects::SyntaxTree;
use crate::error::{ContentKind, PackError, PackResult};
use crate::infrastructure::content::Literal;

use super::Packaging;

impl Packaging {
    /// Text content of a source file, from its installed provider
    pub fn text_content(&mut self, source: SourceId) -> PackResult<String> {
        if let Some(text) = &self.sources[source.0].cache().text {
            return Ok(text.clone());
        }

        let file = &self.sources[source.0];
        let provider = file.content_provider();
        let request = ContentRequest {
            logical_path: file.logical_path(),
            fs: self.fs.as_ref(),
            source_directories: &self.source_directories,
        };
        let text = provider
            .read_text(&request)
            .ok_or_else(|| PackError::UnsupportedContent {
                path: file.logical_path().to_string(),
                kind: ContentKind::Text,
            })??;

        if provider.caches_reads() {
            self.sources[source.0].cache_mut().text = Some(text.clone());
        }
        Ok(text)
    }

    /// Binary content of a source file, from its installed provider
    pub fn binary_content(&mut self, source: SourceId) -> PackResult<Vec<u8>> {
        if let Some(bytes) = &self.sources[source.0].cache().binary {
            return Ok(bytes.clone());
        }

        let file = &self.sources[source.0];
        let provider = file.content_provider();
        let request = ContentRequest {
            logical_path: file.logical_path(),
            fs: self.fs.as_ref(),
            source_directories: &self.source_directories,
        };
        let bytes = provider
            .read_binary(&request)
            .ok_or_else(|| PackError::UnsupportedContent {
                path: file.logical_path().to_string(),
                kind: ContentKind::Binary,
            })??;

        if provider.caches_reads() {
            self.sources[source.0].cache_mut().binary = Some(bytes.clone());
        }
        Ok(bytes)
    }

    /// Replace the content with literal text; later reads no longer touch
    /// the previous backing store
    pub fn set_text_content(&mut self, source: SourceId, text: impl Into<String>) {
        self.set_content_provider(source, Rc::new(Literal::text(text)));
    }

    /// Replace the content with literal bytes
    pub fn set_binary_content(&mut self, source: SourceId, bytes: Vec<u8>) {
        self.set_content_provider(source, Rc::new(Literal::binary(bytes)));
    }

    /// Install a provider, dropping everything derived from the previous one
    pub fn set_content_provider(&mut self, source: SourceId, provider: Rc<dyn ContentProvider>) {
        let file = &mut self.sources[source.0];
        file.cache_mut().clear();
        file.set_content_provider(provider);
    }

    /// Drop cached derived content (loaded text/bytes, parsed tree)
    pub fn clear_content(&mut self, source: SourceId) {
        self.sources[source.0].cache_mut().clear();
    }

    /// Syntax tree of a source file, parsed with `codec` and cached until
    /// the content is cleared or replaced
    pub fn tree(&mut self, source: SourceId, codec: &dyn TreeCodec) -> PackResult<SyntaxTree> {
        if let Some(tree) = &self.sources[source.0].cache().tree {
            return Ok(tree.clone());
        }
        let text = self.text_content(source)?;
        let tree = codec.parse(&text, self.sources[source.0].logical_path())?;
        self.sources[source.0].cache_mut().tree = Some(tree.clone());
        Ok(tree)
    }
}
