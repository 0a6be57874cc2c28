//! Environment source backed by the live process environment

use std::env;
use std::ffi::OsString;
use std::sync::Arc;

use crate::log_warn;
use crate::logging::{NoOpLogger, SharedLogger};
use super::traits::EnvSource;

/// Reads variables from the process environment
///
/// A variable that is set counts as present even when its value is not
/// valid unicode; `var` then returns a lossy copy and logs a warning, while
/// `var_os` returns the raw value.
///
/// # Example
///
/// ```
/// use ingestor_config::env::{EnvSource, ProcessEnv};
///
/// let env = ProcessEnv::new();
/// let host = env.var_or("MONGO_HOST", "localhost");
/// # let _ = host;
/// ```
#[derive(Clone)]
pub struct ProcessEnv {
    logger: SharedLogger,
}

impl Default for ProcessEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessEnv {
    pub fn new() -> Self {
        Self::with_logger(Arc::new(NoOpLogger::new()))
    }

    /// Report non-unicode values through `logger`
    pub fn with_logger(logger: SharedLogger) -> Self {
        Self { logger }
    }
}

impl EnvSource for ProcessEnv {
    fn name(&self) -> &str {
        "process"
    }

    fn var(&self, key: &str) -> Option<String> {
        match env::var_os(key)?.into_string() {
            Ok(value) => Some(value),
            Err(raw) => {
                log_warn!(self.logger, "{} is not valid unicode, using a lossy copy", key);
                Some(raw.to_string_lossy().into_owned())
            }
        }
    }

    fn var_os(&self, key: &str) -> Option<OsString> {
        env::var_os(key)
    }
}

impl std::fmt::Debug for ProcessEnv {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessEnv").finish()
    }
}
