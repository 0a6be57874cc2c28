//! Secret lookup
//!
//! - `SecretStore` trait, the read-only seam the resolver depends on
//! - `SecretReader`: Docker-style secrets directory, one file per secret
//! - `MemorySecretStore`: in-memory, for tests and embedding
//!
//! Lookups return `SecretLookup`, which keeps unreadable secrets apart from
//! missing ones until the caller collapses it to an `Option`.

mod traits;
mod reader;
mod memory_store;

pub use traits::{read_trimmed, SecretLookup, SecretReadError, SecretStore};
pub use reader::{SecretReader, SECRETS_DIR_VAR, DEFAULT_SECRETS_DIR};
pub use memory_store::MemorySecretStore;
