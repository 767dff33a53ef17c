//! Builder port - strategy materializing one output file
//!
//! `build` runs synchronously; when it returns `Ok`, the package bytes are
//! written to the output file's physical path (or a problem was reported
//! through the packaging and nothing was written).

use crate::application::Packaging;
use crate::domain::entities::OutputId;
use crate::error::PackResult;

pub trait Builder {
    /// Type name used in diagnostics
    fn name(&self) -> &'static str;

    /// Produce the bytes of `output` from its ordered source files
    fn build(&self, packaging: &mut Packaging, output: OutputId) -> PackResult<()>;
}
