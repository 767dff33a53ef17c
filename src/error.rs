//! Error types for Packsmith
//!
//! Uses `thiserror` for library errors. Every failure the packager can
//! surface is a variant of [`PackError`]; [`PackError::class`] tells the
//! orchestrator whether it is a configuration problem, a validation finding
//! that is counted and reported, an I/O failure local to one output file, or
//! a structural failure that aborts the run.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::file_system::FsError;

/// Result type alias for Packsmith operations
pub type PackResult<T> = Result<T, PackError>;

/// Broad category of a [`PackError`], used to decide how the run reacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Bad configuration detected before or while setting up packages. Fatal.
    Configuration,
    /// Problem found while validating the graph or a package. Reported and counted.
    Validation,
    /// Filesystem failure. Fatal for the output file being built only.
    Io,
    /// Anything else raised from inside a builder or visitor. Aborts the run.
    Structural,
}

/// Kind of content requested from a content provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Binary,
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentKind::Text => write!(f, "text"),
            ContentKind::Binary => write!(f, "binary"),
        }
    }
}

/// Main error type for Packsmith operations
#[derive(Error, Debug)]
pub enum PackError {
    /// `add_source_file` with `must_create` on an existing entry
    #[error("source file already present: {path}")]
    DuplicateSourceFile { path: String },

    /// `add_output_file` with `must_create` on an existing entry
    #[error("output file already present: {path}")]
    DuplicateOutputFile { path: String },

    /// Lookup of an output file that was never registered
    #[error("cannot find output file {path}")]
    UnknownOutputFile { path: String },

    /// Descriptor names a type missing from the factory registry
    #[error("unknown {kind} type '{name}'")]
    UnknownType { kind: &'static str, name: String },

    /// A package description sets a builder on an output that already has one
    #[error("a builder is already configured for {output}")]
    BuilderAlreadySet { output: String },

    /// A source file claimed by two different packages
    #[error("{source_file} is configured to be both in {existing} and {requested}")]
    ConflictingBinding {
        source_file: String,
        existing: String,
        requested: String,
    },

    /// Descriptor config that the constructor could not accept
    #[error("invalid configuration for {name}: {message}")]
    InvalidConfig { name: String, message: String },

    /// Neither the package nor the packaging provides a builder
    #[error("no builder is defined for {output}")]
    NoBuilder { output: String },

    /// Dependency cycle; the chain starts and ends with the same file
    #[error("circular dependency detected: {}", chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    /// A dependency lives in a package that is built later
    #[error(
        "{dependent} inside {package} depends on {dependency} inside {dependency_package} which is built after"
    )]
    CrossPackageOrder {
        dependent: String,
        package: String,
        dependency: String,
        dependency_package: String,
    },

    /// A dependency that belongs to no package while auto-adoption is off
    #[error("{dependent} inside {package} depends on {dependency} which is not packaged")]
    UnassignedDependency {
        dependent: String,
        package: String,
        dependency: String,
    },

    /// A declared dependency that resolves to no known file
    #[error("{dependent} depends on {dependency} which cannot be found")]
    MissingDependency {
        dependent: String,
        dependency: String,
    },

    /// Builder handed the wrong number of source files
    #[error("{output} is built with the '{builder}' builder, which expects {expected} input file(s), but has {actual}")]
    BuilderArity {
        output: String,
        builder: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Content provider does not support the requested kind of content
    #[error("{kind} content not available for {path}")]
    UnsupportedContent { path: String, kind: ContentKind },

    /// External compiler rejected a source
    #[error("compile error in {path}: {message}")]
    Compile { path: String, message: String },

    /// Glob pattern that cannot be compiled
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Configuration file could not be parsed
    #[error("invalid configuration file {file}: {message}")]
    ConfigFile { file: PathBuf, message: String },

    /// Filesystem collaborator failure
    #[error("{path}: {source}")]
    Fs {
        path: PathBuf,
        #[source]
        source: FsError,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PackError {
    /// Wrap a filesystem error with the path it concerns
    pub fn fs(path: impl Into<PathBuf>, source: FsError) -> Self {
        PackError::Fs {
            path: path.into(),
            source,
        }
    }

    /// Category deciding how the orchestrator handles this error
    pub fn class(&self) -> ErrorClass {
        match self {
            PackError::DuplicateSourceFile { .. }
            | PackError::DuplicateOutputFile { .. }
            | PackError::UnknownOutputFile { .. }
            | PackError::UnknownType { .. }
            | PackError::BuilderAlreadySet { .. }
            | PackError::ConflictingBinding { .. }
            | PackError::InvalidConfig { .. }
            | PackError::InvalidPattern { .. }
            | PackError::ConfigFile { .. } => ErrorClass::Configuration,
            PackError::NoBuilder { .. }
            | PackError::Cycle { .. }
            | PackError::CrossPackageOrder { .. }
            | PackError::UnassignedDependency { .. }
            | PackError::MissingDependency { .. }
            | PackError::BuilderArity { .. }
            | PackError::Compile { .. } => ErrorClass::Validation,
            PackError::Fs { .. } | PackError::Io(_) => ErrorClass::Io,
            PackError::UnsupportedContent { .. } | PackError::Json(_) => ErrorClass::Structural,
        }
    }
}
