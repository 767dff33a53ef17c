//! Logical Path Value Object
//!
//! The registry key of a source or output file. Normalization makes sure
//! two spellings of the same location (`a\b.js`, `./a//b.js`, `a/x/../b.js`)
//! end up as one key:
//! - Separators are canonicalized to `/`
//! - `.` and empty segments are dropped
//! - `name/..` pairs collapse; leading `..` segments that cannot collapse stay

use std::fmt;
use std::path::{Path, PathBuf};

/// A normalized logical path
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LogicalPath(String);

impl LogicalPath {
    /// Normalize any path spelling into a logical path
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().replace('\\', "/");
        let absolute = raw.starts_with('/');
        let mut segments: Vec<&str> = Vec::new();

        for segment in raw.split('/') {
            match segment {
                "" | "." => {}
                ".." => match segments.last() {
                    Some(&last) if last != ".." => {
                        segments.pop();
                    }
                    _ if absolute => {}
                    _ => segments.push(".."),
                },
                other => segments.push(other),
            }
        }

        let joined = segments.join("/");
        if absolute {
            Self(format!("/{}", joined))
        } else if joined.is_empty() {
            Self(".".to_string())
        } else {
            Self(joined)
        }
    }

    /// Build a logical path from a filesystem path
    pub fn from_path(path: &Path) -> Self {
        Self::new(path.to_string_lossy())
    }

    /// The normalized string form
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Relative filesystem path equivalent
    pub fn to_path_buf(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// Directory part (empty for a bare file name)
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Final segment
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Join a relative path below this one
    pub fn join(&self, child: impl AsRef<str>) -> Self {
        if self.0 == "." {
            Self::new(child)
        } else {
            Self::new(format!("{}/{}", self.0, child.as_ref()))
        }
    }
}

impl fmt::Display for LogicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for LogicalPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LogicalPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for LogicalPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}
