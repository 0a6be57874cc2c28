//! In-memory environment source

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::EnvSource;

/// In-memory environment for tests and embedding
///
/// Lets callers resolve configuration against a fixed set of variables
/// without touching the process environment, which is shared by every
/// thread of the test harness.
///
/// # Example
///
/// ```
/// use ingestor_config::env::{EnvSource, MemoryEnv};
///
/// let env = MemoryEnv::new();
/// env.set("ODDS_API_KEY", "abc");
/// assert_eq!(env.var("ODDS_API_KEY"), Some("abc".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    /// Create an empty environment
    pub fn new() -> Self {
        Self {
            vars: RwLock::new(HashMap::new()),
        }
    }

    /// Create an environment with initial values
    pub fn with_vars(initial: HashMap<String, String>) -> Self {
        Self {
            vars: RwLock::new(initial),
        }
    }

    /// Builder-style setter
    pub fn with_var(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a variable
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        let mut vars = self.vars.write().unwrap();
        vars.insert(key.into(), value.into());
    }

    /// Unset a variable, returning whether it was present
    pub fn remove(&self, key: &str) -> bool {
        let mut vars = self.vars.write().unwrap();
        vars.remove(key).is_some()
    }

    /// Get the number of variables
    pub fn len(&self) -> usize {
        let vars = self.vars.read().unwrap();
        vars.len()
    }

    /// Check if the environment is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EnvSource for MemoryEnv {
    fn name(&self) -> &str {
        "memory"
    }

    fn var(&self, key: &str) -> Option<String> {
        let vars = self.vars.read().unwrap();
        vars.get(key).cloned()
    }
}
