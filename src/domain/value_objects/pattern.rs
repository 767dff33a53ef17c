//! Pattern list value object
//!
//! File patterns in package descriptions and visitor configs are globs
//! matched against the whole logical path (via `globset`): `*` never crosses
//! a `/`, so `*.js` only matches top-level files and `app/*.js` only direct
//! children of `app`. `**` spans directories and a leading `!` turns a
//! pattern into an exclusion.

use globset::{GlobBuilder, GlobMatcher};

use crate::error::{PackError, PackResult};

/// One compiled pattern
#[derive(Debug)]
struct CompiledPattern {
    matcher: GlobMatcher,
    exclude: bool,
}

impl CompiledPattern {
    fn matches(&self, path: &str) -> bool {
        self.matcher.is_match(path.trim_start_matches('/'))
    }
}

/// Ordered list of include/exclude glob patterns
#[derive(Debug)]
pub struct PatternList {
    source: Vec<String>,
    compiled: Vec<CompiledPattern>,
}

impl PatternList {
    /// Compile the given patterns, in order
    pub fn new<I, S>(patterns: I) -> PackResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Vec::new();
        let mut compiled = Vec::new();

        for pattern in patterns {
            let pattern = pattern.as_ref().trim();
            if pattern.is_empty() {
                continue;
            }
            let (exclude, glob) = match pattern.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, pattern),
            };

            let matcher = GlobBuilder::new(glob.trim_start_matches('/'))
                .literal_separator(true)
                .build()
                .map_err(|e| PackError::InvalidPattern {
                    pattern: pattern.to_string(),
                    message: e.to_string(),
                })?
                .compile_matcher();

            source.push(pattern.to_string());
            compiled.push(CompiledPattern { matcher, exclude });
        }

        Ok(Self { source, compiled })
    }

    /// A list that matches every path
    pub fn all() -> Self {
        Self::new(["**/*"]).unwrap_or_else(|_| Self::empty())
    }

    /// A list that matches nothing
    pub fn empty() -> Self {
        Self {
            source: Vec::new(),
            compiled: Vec::new(),
        }
    }

    /// The patterns as written
    pub fn patterns(&self) -> &[String] {
        &self.source
    }

    /// Check if this list has no patterns
    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }

    /// Whether `path` is selected: the last pattern matching it decides.
    pub fn is_match(&self, path: &str) -> bool {
        self.compiled
            .iter()
            .rev()
            .find(|p| p.matches(path))
            .map(|p| !p.exclude)
            .unwrap_or(false)
    }

    /// Select candidates pattern by pattern.
    ///
    /// Each include pattern appends its matches (in candidate order) that were
    /// not selected yet; each exclude pattern drops matches selected so far.
    pub fn expand<'a, I>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: Clone,
    {
        let candidates = candidates.into_iter();
        let mut selected: Vec<String> = Vec::new();

        for pattern in &self.compiled {
            if pattern.exclude {
                selected.retain(|path| !pattern.matches(path));
                continue;
            }
            for candidate in candidates.clone() {
                if pattern.matches(candidate) && !selected.iter().any(|s| s == candidate) {
                    selected.push(candidate.to_string());
                }
            }
        }

        selected
    }
}
