//! Common test utilities for Packsmith integration tests.
//!
//! This module provides:
//! - `memory_packaging`: a packaging over an in-memory filesystem
//! - `with_declared_dependencies`: dependency edges from a TOML table
//! - `TestEnv`: an isolated temp project plus helpers to run the CLI

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::rc::Rc;

use tempfile::TempDir;

use packsmith::domain::ports::NoopLogger;
use packsmith::infrastructure::visitors::DeclaredDependencies;
use packsmith::{MemoryFs, Packaging};

/// Packaging reading from `src/` and writing to `out/` in a `MemoryFs`
pub fn memory_packaging(files: &[(&str, &str)]) -> (Packaging, MemoryFs) {
    let fs = MemoryFs::new();
    for (path, content) in files {
        fs.insert(Path::new("src").join(path), *content);
    }
    let mut packaging = Packaging::new(Rc::new(fs.clone()), Rc::new(NoopLogger));
    packaging.set_source_directories(vec![PathBuf::from("src")]);
    packaging.set_output_directory("out");
    (packaging, fs)
}

/// Register a `DeclaredDependencies` visitor with the given edges, e.g.
/// `"\"a.js\" = [\"b.js\"]"`
pub fn with_declared_dependencies(packaging: &mut Packaging, edges: &str) {
    let config: toml::Value =
        toml::from_str(&format!("[dependencies]\n{edges}")).expect("valid edges");
    packaging.add_visitor(Rc::new(
        DeclaredDependencies::from_config(&config).expect("valid config"),
    ));
}

/// Error messages recorded by a packaging
pub fn error_messages(packaging: &Packaging) -> Vec<String> {
    packaging.errors().iter().map(ToString::to_string).collect()
}

/// Result of running the packsmith binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl From<Output> for TestResult {
    fn from(output: Output) -> Self {
        Self {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

/// Isolated project directory for CLI tests
pub struct TestEnv {
    pub root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file, creating parent directories
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(path, content).expect("write file");
        self
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        std::fs::read_to_string(self.path(relative)).ok()
    }

    /// Run packsmith from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut command = Command::new(env!("CARGO_BIN_EXE_packsmith"));
        command
            .args(args)
            .current_dir(self.root.path())
            .env_remove("PACKSMITH_OUTPUT_DIR")
            .env_remove("PACKSMITH_FAIL_FAST")
            .env_remove("PACKSMITH_LOG");
        for (key, value) in env_vars {
            command.env(key, value);
        }
        command.output().expect("run packsmith").into()
    }
}
