//! Single-copy builder: the package is exactly one input file, copied byte
//! for byte

use crate::application::Packaging;
use crate::domain::entities::OutputId;
use crate::domain::ports::Builder;
use crate::error::{PackError, PackResult};

#[derive(Debug, Clone, Copy, Default)]
pub struct SingleCopy;

impl Builder for SingleCopy {
    fn name(&self) -> &'static str {
        "Copy"
    }

    fn build(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()> {
        let sources = packaging.output(output).source_files().to_vec();
        let &[source] = sources.as_slice() else {
            let problem = PackError::BuilderArity {
                output: packaging.output(output).logical_path().to_string(),
                builder: self.name(),
                expected: 1,
                actual: sources.len(),
            };
            return packaging.report(problem);
        };

        packaging.call_visitors("on_write_input_file", |v, p| {
            v.on_write_input_file(p, output, source)
        })?;
        let content = packaging.binary_content(source)?;
        packaging.clear_content(source);
        packaging.write_output(output, content)
    }
}
