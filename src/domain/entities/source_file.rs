//! SourceFile entity - one logical input of the packaging
//!
//! A source file is created once per logical path and lives as long as the
//! `Packaging` that owns it. It records:
//! - the content provider currently installed (lazy disk loader by default)
//! - content derived from that provider (loaded text/bytes, parsed tree)
//! - the output file it is bound to, if any
//! - its dependencies, once computed by visitors

use std::fmt;
use std::rc::Rc;

use crate::domain::ports::ContentProvider;
use crate::domain::value_objects::{LogicalPath, SyntaxTree};

use super::OutputId;

/// Stable handle of a source file inside its `Packaging`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourceId(pub(crate) usize);

impl SourceId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Content derived from the installed provider, dropped by `clear`
#[derive(Debug, Clone, Default)]
pub struct ContentCache {
    pub text: Option<String>,
    pub binary: Option<Vec<u8>>,
    pub tree: Option<SyntaxTree>,
}

impl ContentCache {
    pub fn clear(&mut self) {
        self.text = None;
        self.binary = None;
        self.tree = None;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.binary.is_none() && self.tree.is_none()
    }
}

/// A source file registered in a packaging
pub struct SourceFile {
    id: SourceId,
    logical_path: LogicalPath,
    provider: Rc<dyn ContentProvider>,
    cache: ContentCache,
    output_file: Option<OutputId>,
    dependencies: Option<Vec<SourceId>>,
}

impl SourceFile {
    pub(crate) fn new(
        id: SourceId,
        logical_path: LogicalPath,
        provider: Rc<dyn ContentProvider>,
    ) -> Self {
        Self {
            id,
            logical_path,
            provider,
            cache: ContentCache::default(),
            output_file: None,
            dependencies: None,
        }
    }

    pub fn id(&self) -> SourceId {
        self.id
    }

    pub fn logical_path(&self) -> &LogicalPath {
        &self.logical_path
    }

    /// Output file this source is packaged into
    pub fn output_file(&self) -> Option<OutputId> {
        self.output_file
    }

    pub(crate) fn set_output_file(&mut self, output: Option<OutputId>) {
        self.output_file = output;
    }

    pub fn content_provider(&self) -> Rc<dyn ContentProvider> {
        Rc::clone(&self.provider)
    }

    pub(crate) fn set_content_provider(&mut self, provider: Rc<dyn ContentProvider>) {
        self.provider = provider;
    }

    pub fn cache(&self) -> &ContentCache {
        &self.cache
    }

    pub(crate) fn cache_mut(&mut self) -> &mut ContentCache {
        &mut self.cache
    }

    /// Dependencies computed so far, `None` until first computed
    pub fn dependencies(&self) -> Option<&[SourceId]> {
        self.dependencies.as_deref()
    }

    /// Start an empty dependency list; returns false if one already exists
    pub(crate) fn begin_dependencies(&mut self) -> bool {
        if self.dependencies.is_some() {
            return false;
        }
        self.dependencies = Some(Vec::new());
        true
    }

    /// Record a dependency; duplicates are ignored. Returns true if added.
    pub(crate) fn record_dependency(&mut self, dependency: SourceId) -> bool {
        let list = self.dependencies.get_or_insert_with(Vec::new);
        if list.contains(&dependency) {
            return false;
        }
        list.push(dependency);
        true
    }
}

impl fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceFile")
            .field("id", &self.id)
            .field("logical_path", &self.logical_path)
            .field("provider", &self.provider.name())
            .field("output_file", &self.output_file)
            .field("dependencies", &self.dependencies)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::content::Literal;

    fn source(path: &str) -> SourceFile {
        SourceFile::new(
            SourceId(0),
            LogicalPath::new(path),
            Rc::new(Literal::text("x")),
        )
    }

    #[test]
    fn dependencies_absent_until_begun() {
        let mut file = source("a.js");
        assert!(file.dependencies().is_none());
        assert!(file.begin_dependencies());
        assert_eq!(file.dependencies(), Some(&[][..]));
        assert!(!file.begin_dependencies());
    }

    #[test]
    fn record_dependency_dedups() {
        let mut file = source("a.js");
        file.begin_dependencies();
        assert!(file.record_dependency(SourceId(1)));
        assert!(!file.record_dependency(SourceId(1)));
        assert!(file.record_dependency(SourceId(2)));
        assert_eq!(file.dependencies(), Some(&[SourceId(1), SourceId(2)][..]));
    }

    #[test]
    fn cache_clear_drops_everything() {
        let mut file = source("a.js");
        file.cache_mut().text = Some("x".into());
        file.cache_mut().tree = Some(SyntaxTree::default());
        file.cache_mut().clear();
        assert!(file.cache().is_empty());
    }
}
