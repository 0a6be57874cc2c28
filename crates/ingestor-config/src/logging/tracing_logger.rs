//! Logger that forwards to the `tracing` ecosystem

use super::traits::Logger;

/// Forwards log lines to `tracing` events under the `ingestor_config` target
///
/// Use this when the host service installs a `tracing` subscriber; the
/// filter can then be tuned with `RUST_LOG=ingestor_config=debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "ingestor_config", "{}", message);
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "ingestor_config", "{}", message);
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "ingestor_config", "{}", message);
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ingestor_config", "{}", message);
    }
}
