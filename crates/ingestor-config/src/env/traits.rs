//! Environment lookup abstraction

use std::ffi::OsString;

/// Read-only view of environment variables
///
/// Resolution only ever asks "is this variable present, and what is its
/// value". Presence is what matters: `Some("")` is a set-but-empty variable,
/// `None` means unset.
///
/// # Example
///
/// ```
/// use ingestor_config::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new().with_var("MONGO_HOST", "mongo");
/// assert_eq!(env.var("MONGO_HOST"), Some("mongo".to_string()));
/// assert_eq!(env.var("MONGO_PORT"), None);
/// ```
pub trait EnvSource: Send + Sync {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Look up a variable, `None` if it is not set
    fn var(&self, key: &str) -> Option<String>;

    /// Look up a variable without requiring unicode, for values used as paths
    fn var_os(&self, key: &str) -> Option<OsString> {
        self.var(key).map(OsString::from)
    }

    /// Look up a variable, falling back to `default` when unset
    fn var_or(&self, key: &str, default: &str) -> String {
        self.var(key).unwrap_or_else(|| default.to_string())
    }

    /// Check if a variable is set (empty values count as set)
    fn contains(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}
