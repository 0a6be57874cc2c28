//! Silent logger

use super::traits::Logger;

/// Discards every message
///
/// `ConfigResolver::new()` starts with this; swap in `TracingLogger` with
/// `ConfigResolver::with_logger` to see skipped `_FILE` paths and unreadable
/// secrets.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for NoOpLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
