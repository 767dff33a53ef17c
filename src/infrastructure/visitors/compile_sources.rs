//! Compile matching input files through an external compiler
//!
//! Only available programmatically: the `Compiler` is a service supplied by
//! the embedding application (template compilers and the like).

use std::rc::Rc;

use crate::application::Packaging;
use crate::domain::entities::{OutputId, SourceId};
use crate::domain::ports::{Compiler, Visitor};
use crate::domain::value_objects::PatternList;
use crate::error::{PackError, PackResult};

pub struct CompileSources {
    compiler: Rc<dyn Compiler>,
    kind: String,
    files: PatternList,
}

impl CompileSources {
    /// Compile files matching `files` as `kind`
    pub fn new(compiler: Rc<dyn Compiler>, kind: impl Into<String>, files: PatternList) -> Self {
        Self {
            compiler,
            kind: kind.into(),
            files,
        }
    }
}

impl Visitor for CompileSources {
    fn name(&self) -> &'static str {
        "CompileSources"
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
        let text = packaging.text_content(source)?;
        let path = packaging.source(source).logical_path().to_string();
        match self.compiler.compile(&self.kind, &text, &path) {
            Ok(compiled) => {
                packaging.set_text_content(source, compiled);
                Ok(())
            }
            Err(err) => packaging.report(PackError::Compile {
                path,
                message: err.to_string(),
            }),
        }
    }
}

impl std::fmt::Debug for CompileSources {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompileSources")
            .field("kind", &self.kind)
            .field("files", &self.files)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::CompileError;
    use crate::domain::value_objects::Descriptor;
    use crate::testing::packaging_with;

    struct Upper;

    impl Compiler for Upper {
        fn compile(&self, kind: &str, source: &str, _path: &str) -> Result<String, CompileError> {
            if source.contains("{bad") {
                return Err(CompileError {
                    message: format!("unclosed {kind} statement"),
                    line: Some(1),
                });
            }
            Ok(source.to_uppercase())
        }
    }

    fn packaging(files: &[(&str, &str)]) -> (Packaging, crate::infrastructure::fs::MemoryFs) {
        let (mut packaging, fs) = packaging_with(files);
        packaging.add_visitor(Rc::new(CompileSources::new(
            Rc::new(Upper),
            "template",
            PatternList::new(["*.tpl"]).unwrap(),
        )));
        packaging.set_default_builder(Some(Descriptor::named("Copy")));
        for (path, _) in files {
            let output = packaging.add_output_file(path, false).unwrap();
            let source = packaging.add_source_file(path).unwrap();
            packaging.set_output_file(source, Some(output));
        }
        (packaging, fs)
    }

    #[test]
    fn compiled_text_is_packaged() {
        let (mut packaging, fs) = packaging(&[("view.tpl", "hello"), ("keep.js", "hello")]);

        packaging.build().unwrap();

        assert_eq!(fs.get_string("out/view.tpl").as_deref(), Some("HELLO"));
        assert_eq!(fs.get_string("out/keep.js").as_deref(), Some("hello"));
    }

    #[test]
    fn compile_error_is_reported() {
        let (mut packaging, _fs) = packaging(&[("broken.tpl", "{bad")]);

        packaging.build().unwrap();

        assert!(matches!(
            packaging.errors(),
            [PackError::Compile { path, message }]
                if path == "broken.tpl" && message == "line 1: unclosed template statement"
        ));
    }
}
