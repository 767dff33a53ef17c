//! Tests for the packaging orchestrator

use std::cell::{Cell, RefCell};
use std::path::PathBuf;
use std::rc::Rc;

use super::*;
use crate::domain::ports::FsError;
use crate::domain::value_objects::PatternList;
use crate::error::ContentKind;
use crate::testing::packaging_with;

/// Records hook calls and queues one extra output file the first time the
/// build queue runs empty
#[derive(Default)]
struct Recorder {
    calls: RefCell<Vec<String>>,
    build_ends: Cell<usize>,
}

impl Visitor for Recorder {
    fn name(&self) -> &'static str {
        "Recorder"
    }

    fn on_before_build(&self, _packaging: &mut Packaging) -> PackResult<()> {
        self.calls.borrow_mut().push("before_build".into());
        Ok(())
    }

    fn on_before_output_file_build(
        &self,
        packaging: &mut Packaging,
        output: OutputId,
    ) -> PackResult<()> {
        self.calls
            .borrow_mut()
            .push(format!("build {}", packaging.output(output).logical_path()));
        Ok(())
    }

    fn on_reaching_build_end(&self, packaging: &mut Packaging) -> PackResult<()> {
        self.build_ends.set(self.build_ends.get() + 1);
        self.calls.borrow_mut().push("build_end".into());
        if self.build_ends.get() == 1 {
            let late = packaging.add_output_file("late.js", true)?;
            let source = packaging.add_source_file("late.js")?;
            packaging.set_output_file(source, Some(late));
        }
        Ok(())
    }

    fn on_after_build(&self, _packaging: &mut Packaging) -> PackResult<()> {
        self.calls.borrow_mut().push("after_build".into());
        Ok(())
    }
}

/// Fails with a filesystem error for one output file
struct FailingOn(&'static str);

impl Builder for FailingOn {
    fn name(&self) -> &'static str {
        "FailingOn"
    }

    fn build(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()> {
        if packaging.output(output).logical_path().as_str() == self.0 {
            return Err(PackError::fs(
                self.0,
                FsError::PermissionDenied(PathBuf::from(self.0)),
            ));
        }
        packaging.write_output(output, b"ok".to_vec())
    }
}

// === TDD: source file registry ===

#[test]
fn add_source_file_is_idempotent_across_spellings() {
    let (mut packaging, _fs) = packaging_with(&[]);

    let first = packaging.add_source_file("a\\b.js").unwrap();
    let second = packaging.add_source_file("a/./b.js").unwrap();

    assert_eq!(first, second);
    assert_eq!(packaging.source_count(), 1);
    assert_eq!(packaging.source(first).logical_path().as_str(), "a/b.js");
    assert_eq!(packaging.get_source_file("a//b.js"), Some(first));
}

#[test]
fn add_source_file_with_must_create_rejects_existing() {
    let (mut packaging, _fs) = packaging_with(&[]);
    packaging.add_source_file("a.js").unwrap();

    let err = packaging.add_source_file_with("a.js", true).unwrap_err();

    assert!(matches!(err, PackError::DuplicateSourceFile { path } if path == "a.js"));
}

#[test]
fn add_source_files_expands_patterns_over_source_directories() {
    let (mut packaging, _fs) =
        packaging_with(&[("app/a.js", ""), ("app/b.css", ""), ("lib/c.js", "")]);

    let ids = packaging
        .add_source_files(&PatternList::new(["**/*.js"]).unwrap())
        .unwrap();

    let paths: Vec<&str> = ids
        .iter()
        .map(|&id| packaging.source(id).logical_path().as_str())
        .collect();
    assert_eq!(paths, vec!["app/a.js", "lib/c.js"]);
}

#[test]
fn absolute_path_finds_first_source_directory() {
    let (mut packaging, fs) = packaging_with(&[("a.js", "")]);
    fs.insert("vendor/a.js", "");
    fs.insert("vendor/v.js", "");
    packaging.set_source_directories(vec![PathBuf::from("src"), PathBuf::from("vendor")]);

    assert_eq!(
        packaging.absolute_path(&LogicalPath::new("a.js")),
        Some(PathBuf::from("src/a.js"))
    );
    assert_eq!(
        packaging.absolute_path(&LogicalPath::new("v.js")),
        Some(PathBuf::from("vendor/v.js"))
    );
    assert_eq!(packaging.absolute_path(&LogicalPath::new("none.js")), None);
}

// === TDD: output file registry ===

#[test]
fn add_output_file_queues_once() {
    let (mut packaging, _fs) = packaging_with(&[]);

    let first = packaging.add_output_file("app.js", false).unwrap();
    let second = packaging.add_output_file("./app.js", false).unwrap();

    assert_eq!(first, second);
    assert_eq!(packaging.queued().collect::<Vec<_>>(), vec![first]);
    assert!(matches!(
        packaging.add_output_file("app.js", true),
        Err(PackError::DuplicateOutputFile { .. })
    ));
}

#[test]
fn set_output_file_moves_and_detaches() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let one = packaging.add_output_file("one.js", false).unwrap();
    let two = packaging.add_output_file("two.js", false).unwrap();
    let a = packaging.add_source_file("a.js").unwrap();
    let b = packaging.add_source_file("b.js").unwrap();

    packaging.set_output_file(a, Some(one));
    packaging.set_output_file(b, Some(one));
    packaging.set_output_file(a, Some(two));

    assert_eq!(packaging.output(one).source_files(), &[b]);
    assert_eq!(packaging.output(two).source_files(), &[a]);
    assert_eq!(packaging.source(a).output_file(), Some(two));

    packaging.set_output_file(a, None);

    assert!(packaging.output(two).source_files().is_empty());
    assert_eq!(packaging.source(a).output_file(), None);
}

#[test]
fn rebinding_to_current_output_keeps_order() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let out = packaging.add_output_file("out.js", false).unwrap();
    let a = packaging.add_source_file("a.js").unwrap();
    let b = packaging.add_source_file("b.js").unwrap();
    packaging.set_output_file(a, Some(out));
    packaging.set_output_file(b, Some(out));

    packaging.set_output_file(a, Some(out));

    assert_eq!(packaging.output(out).source_files(), &[a, b]);
}

// === TDD: packages ===

#[test]
fn add_package_binds_matching_files() {
    let (mut packaging, _fs) = packaging_with(&[("app/a.js", ""), ("app/b.js", "")]);

    let out = packaging
        .add_package(
            &PackageSpec::new("app.js")
                .with_builder(Descriptor::named("Concat"))
                .with_files(["app/*.js"]),
        )
        .unwrap();

    assert_eq!(packaging.output(out).source_files().len(), 2);
    assert!(packaging.output(out).has_builder());
}

#[test]
fn file_in_two_packages_is_conflicting() {
    let (mut packaging, _fs) = packaging_with(&[("a.js", "")]);
    packaging
        .add_package(&PackageSpec::new("one.js").with_files(["a.js"]))
        .unwrap();

    let err = packaging
        .add_package(&PackageSpec::new("two.js").with_files(["a.js"]))
        .unwrap_err();

    assert!(matches!(
        err,
        PackError::ConflictingBinding { source_file, existing, requested }
            if source_file == "a.js" && existing == "one.js" && requested == "two.js"
    ));
}

#[test]
fn same_file_name_in_other_directory_is_not_bound() {
    let (mut packaging, _fs) = packaging_with(&[("main.js", ""), ("app/main.js", "")]);
    let root = packaging
        .add_package(&PackageSpec::new("root.js").with_files(["main.js"]))
        .unwrap();

    let app = packaging
        .add_package(&PackageSpec::new("app.js").with_files(["app/main.js"]))
        .unwrap();

    let owner = |path: &str| {
        let source = packaging.get_source_file(path).unwrap();
        packaging.source(source).output_file()
    };
    assert_eq!(owner("main.js"), Some(root));
    assert_eq!(owner("app/main.js"), Some(app));
    assert_eq!(packaging.output(root).source_files().len(), 1);
}

#[test]
fn second_builder_for_same_package_is_rejected() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let spec = PackageSpec::new("app.js").with_builder(Descriptor::named("Concat"));
    packaging.add_package(&spec).unwrap();

    let again = PackageSpec::new("app.js").with_builder(Descriptor::named("Copy"));
    let err = packaging.add_package(&again).unwrap_err();

    assert!(matches!(err, PackError::BuilderAlreadySet { output } if output == "app.js"));
}

// === TDD: rename ===

#[test]
fn rename_before_build_changes_written_path() {
    let (mut packaging, fs) = packaging_with(&[("a.js", "a")]);
    packaging.set_default_builder(Some(Descriptor::named("Copy")));
    let out = packaging
        .add_package(&PackageSpec::new("a.js").with_files(["a.js"]))
        .unwrap();

    let renamed = packaging.rename_output_file("a.js", "renamed.js").unwrap();
    packaging.build().unwrap();

    assert_eq!(renamed, out);
    assert_eq!(packaging.get_output_file("a.js"), None);
    assert_eq!(fs.get_string("out/renamed.js").as_deref(), Some("a"));
    assert_eq!(fs.get_string("out/a.js"), None);
}

#[test]
fn rename_after_build_moves_the_file() {
    let (mut packaging, fs) = packaging_with(&[("a.js", "a")]);
    packaging.set_default_builder(Some(Descriptor::named("Copy")));
    let out = packaging
        .add_package(&PackageSpec::new("a.js").with_files(["a.js"]))
        .unwrap();
    packaging.build().unwrap();

    packaging.rename_output_file("a.js", "dir/b.js").unwrap();

    assert_eq!(fs.get_string("out/a.js"), None);
    assert_eq!(fs.get_string("out/dir/b.js").as_deref(), Some("a"));
    assert_eq!(
        packaging.output(out).output_path(),
        Some(PathBuf::from("out/dir/b.js").as_path())
    );
}

#[test]
fn rename_errors() {
    let (mut packaging, _fs) = packaging_with(&[]);
    packaging.add_output_file("a.js", false).unwrap();
    packaging.add_output_file("b.js", false).unwrap();

    assert!(matches!(
        packaging.rename_output_file("missing.js", "c.js"),
        Err(PackError::UnknownOutputFile { .. })
    ));
    assert!(matches!(
        packaging.rename_output_file("a.js", "b.js"),
        Err(PackError::DuplicateOutputFile { path }) if path == "b.js"
    ));
}

// === TDD: build loop ===

#[test]
fn build_end_fires_each_time_the_queue_empties() {
    let (mut packaging, fs) = packaging_with(&[("first.js", "1"), ("late.js", "2")]);
    let recorder = Rc::new(Recorder::default());
    packaging.add_visitor(recorder.clone());
    packaging.set_default_builder(Some(Descriptor::named("Copy")));
    packaging
        .add_package(&PackageSpec::new("first.js").with_files(["first.js"]))
        .unwrap();

    packaging.build().unwrap();

    assert_eq!(recorder.build_ends.get(), 2);
    assert_eq!(
        *recorder.calls.borrow(),
        vec![
            "before_build",
            "build first.js",
            "build_end",
            "build late.js",
            "build_end",
            "after_build",
        ]
    );
    assert_eq!(fs.get_string("out/late.js").as_deref(), Some("2"));
}

#[test]
fn empty_build_still_reaches_build_end() {
    let (mut packaging, _fs) = packaging_with(&[("late.js", "")]);
    let recorder = Rc::new(Recorder::default());
    packaging.add_visitor(recorder.clone());
    packaging.set_default_builder(Some(Descriptor::named("Copy")));

    packaging.build().unwrap();

    assert_eq!(recorder.build_ends.get(), 2);
    assert!(packaging
        .output(packaging.get_output_file("late.js").unwrap())
        .is_finished());
}

#[test]
fn missing_builder_is_reported_and_build_continues() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let out = packaging.add_output_file("a.js", false).unwrap();

    packaging.build().unwrap();

    assert!(matches!(packaging.errors(), [PackError::NoBuilder { output }] if output == "a.js"));
    assert!(!packaging.output(out).is_finished());
}

#[test]
fn fail_fast_aborts_on_first_error() {
    let (mut packaging, _fs) = packaging_with(&[]);
    packaging.set_fail_fast(true);
    packaging.add_output_file("a.js", false).unwrap();
    packaging.add_output_file("b.js", false).unwrap();

    let err = packaging.build().unwrap_err();

    assert!(matches!(err, PackError::NoBuilder { output } if output == "a.js"));
    assert_eq!(packaging.error_count(), 0);
    assert_eq!(packaging.queued().count(), 1);
}

#[test]
fn io_errors_skip_only_the_failing_output() {
    let (mut packaging, fs) = packaging_with(&[]);
    let failing: Rc<dyn Builder> = Rc::new(FailingOn("bad.js"));
    packaging.set_default_builder(Some(Descriptor::instance(failing)));
    packaging.add_output_file("bad.js", false).unwrap();
    packaging.add_output_file("good.js", false).unwrap();

    packaging.build().unwrap();

    assert_eq!(packaging.error_count(), 1);
    assert_eq!(packaging.errors()[0].class(), ErrorClass::Io);
    assert_eq!(fs.get_string("out/good.js").as_deref(), Some("ok"));
}

// === TDD: content ===

#[test]
fn text_reads_are_cached_until_cleared() {
    let (mut packaging, fs) = packaging_with(&[("a.js", "first")]);
    let a = packaging.add_source_file("a.js").unwrap();

    assert_eq!(packaging.text_content(a).unwrap(), "first");
    fs.insert("src/a.js", "second");
    assert_eq!(packaging.text_content(a).unwrap(), "first");

    packaging.clear_content(a);
    assert_eq!(packaging.text_content(a).unwrap(), "second");
}

#[test]
fn set_text_content_replaces_the_backing_file() {
    let (mut packaging, fs) = packaging_with(&[("a.js", "disk")]);
    let a = packaging.add_source_file("a.js").unwrap();
    packaging.text_content(a).unwrap();

    packaging.set_text_content(a, "literal");
    fs.insert("src/a.js", "changed");

    assert_eq!(packaging.text_content(a).unwrap(), "literal");
    assert_eq!(packaging.binary_content(a).unwrap(), b"literal".to_vec());
}

#[test]
fn binary_literal_has_no_text() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let a = packaging.add_source_file("img.png").unwrap();
    packaging.set_binary_content(a, vec![0x89, 0x50]);

    let err = packaging.text_content(a).unwrap_err();

    assert!(matches!(
        err,
        PackError::UnsupportedContent { path, kind: ContentKind::Text } if path == "img.png"
    ));
    assert_eq!(packaging.binary_content(a).unwrap(), vec![0x89, 0x50]);
}

#[test]
fn missing_file_is_an_fs_error() {
    let (mut packaging, _fs) = packaging_with(&[]);
    let a = packaging.add_source_file("ghost.js").unwrap();

    let err = packaging.text_content(a).unwrap_err();

    assert_eq!(err.class(), ErrorClass::Io);
}
