//! In-memory secret store

use std::collections::HashMap;
use std::sync::RwLock;

use super::traits::{SecretLookup, SecretStore};

/// In-memory secret store for tests and embedding
///
/// Values are returned exactly as inserted; no trimming is applied.
///
/// # Thread Safety
///
/// The store uses `RwLock` internally and is safe to use from multiple threads.
///
/// # Example
///
/// ```
/// use ingestor_config::secrets::{SecretStore, MemorySecretStore};
///
/// let store = MemorySecretStore::new();
/// store.insert("odds_api_key", "abc");
/// assert_eq!(store.get("odds_api_key"), Some("abc".to_string()));
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a memory store with initial values
    pub fn with_secrets(initial: HashMap<String, String>) -> Self {
        Self {
            secrets: RwLock::new(initial),
        }
    }

    /// Builder-style insert
    pub fn with_secret(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace a secret
    pub fn insert(&self, name: impl Into<String>, value: impl Into<String>) {
        let mut secrets = self.secrets.write().unwrap();
        secrets.insert(name.into(), value.into());
    }

    /// Remove a secret, returning whether it was present
    pub fn remove(&self, name: &str) -> bool {
        let mut secrets = self.secrets.write().unwrap();
        secrets.remove(name).is_some()
    }

    /// Clear all secrets from the store
    pub fn clear(&self) {
        let mut secrets = self.secrets.write().unwrap();
        secrets.clear();
    }

    /// Get the number of secrets in the store
    pub fn len(&self) -> usize {
        let secrets = self.secrets.read().unwrap();
        secrets.len()
    }

    /// Check if the store is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SecretStore for MemorySecretStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn lookup(&self, name: &str) -> SecretLookup {
        let secrets = self.secrets.read().unwrap();
        match secrets.get(name) {
            Some(value) => SecretLookup::Found(value.clone()),
            None => SecretLookup::NotFound,
        }
    }
}
