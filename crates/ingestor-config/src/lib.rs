//! Ingestor Config
//!
//! Configuration and secret resolution for the data ingestor. Each setting is
//! resolved once at startup from, in order:
//!
//! 1. `{VAR}_FILE`, an explicit path to a file holding the value
//! 2. `VAR`, the plain environment variable
//! 3. `<DOCKER_SECRETS_DIR>/<secret_name>` (default `/run/secrets`)
//! 4. A default, which may be absent
//!
//! ```rust,no_run
//! use ingestor_config::ConfigRegistry;
//!
//! let config = ConfigRegistry::init();
//! println!("{}", config.mongo_url());
//! ```
//!
//! Resolution never fails. Missing credentials surface as `NOT_SET` or
//! `None`; see `ConfigRegistry::unconfigured`.

pub mod env;
pub mod secrets;
pub mod logging;
pub mod resolver;
pub mod registry;

// Re-export commonly used types
pub use env::{EnvSource, ProcessEnv, MemoryEnv};

pub use secrets::{
    SecretStore, SecretReader, SecretLookup, SecretReadError, MemorySecretStore,
};

pub use logging::{Logger, SharedLogger, NoOpLogger, TracingLogger};

pub use resolver::{ConfigResolver, ResolutionRequest, Resolved, ValueSource};

pub use registry::{ConfigRegistry, ConfigSnapshot, SecretStatus, NOT_SET};
