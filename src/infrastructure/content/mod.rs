//! Content Providers
//!
//! - `FileLoader` - lazy read from disk (the default provider)
//! - `Literal` - in-memory text or bytes installed by `set_text_content` /
//!   `set_binary_content`

mod file_loader;
mod literal;

pub use file_loader::FileLoader;
pub use literal::Literal;
