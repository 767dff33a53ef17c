//! Logger Port
//!
//! The packaging run reports progress and problems through this trait. It is
//! handed to `Packaging::new` explicitly instead of living in a global.

/// Trait for receiving packaging log output
///
/// Implementations can be:
/// - TracingLogger: forwards to the `tracing` macros
/// - NoopLogger: silent operation
pub trait Logger {
    /// A problem that counts towards the run's error total
    fn error(&self, message: &str);

    /// A problem that does not fail the run
    fn warn(&self, message: &str);

    /// Normal progress output
    fn info(&self, message: &str);

    /// Verbose progress output
    fn debug(&self, message: &str) {
        let _ = message;
    }
}

/// No-op logger for silent operation
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn error(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn info(&self, _message: &str) {}
}
