//! Layered resolution of a single configuration value
//!
//! Sources are checked in a fixed order and the first one with a value wins:
//! 1. `{VAR}_FILE`: an explicit file path (Compose, Kubernetes)
//! 2. `VAR`: the plain environment variable, returned verbatim
//! 3. The secret store, under the secret name or the lowercased variable name
//! 4. The caller's default, which may be absent
//!
//! Nothing here returns an error. Unreadable files are logged and skipped.

use std::path::PathBuf;
use std::sync::Arc;

use crate::env::{EnvSource, ProcessEnv};
use crate::logging::{NoOpLogger, SharedLogger};
use crate::secrets::{read_trimmed, SecretLookup, SecretReader, SecretStore};
use crate::{log_debug, log_warn};
use super::request::{ResolutionRequest, Resolved, ValueSource};

/// Resolves configuration values from env, `_FILE` overrides, secrets and defaults
///
/// Cheap to clone; the sources are shared.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ingestor_config::env::MemoryEnv;
/// use ingestor_config::secrets::MemorySecretStore;
/// use ingestor_config::ConfigResolver;
///
/// let env = MemoryEnv::new().with_var("ODDS_API_KEY", "from-env");
/// let secrets = MemorySecretStore::new().with_secret("odds_api_key", "from-secret");
/// let resolver = ConfigResolver::with_sources(Arc::new(env), Arc::new(secrets));
///
/// assert_eq!(resolver.resolve("ODDS_API_KEY", None, None), Some("from-env".to_string()));
/// ```
#[derive(Clone)]
pub struct ConfigResolver {
    env: Arc<dyn EnvSource>,
    secrets: Arc<dyn SecretStore>,
    logger: SharedLogger,
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigResolver {
    /// Resolver over the process environment and `DOCKER_SECRETS_DIR`
    pub fn new() -> Self {
        Self::from_process_env(Arc::new(NoOpLogger::new()))
    }

    /// Resolver over the process environment, with `logger` shared by the
    /// resolver and the environment reader
    pub fn from_process_env(logger: SharedLogger) -> Self {
        let env = ProcessEnv::with_logger(logger.clone());
        Self::with_env(Arc::new(env)).with_logger(logger)
    }

    /// Resolver over the given environment, with the secrets directory taken from it
    pub fn with_env(env: Arc<dyn EnvSource>) -> Self {
        let secrets = SecretReader::from_env(env.as_ref());
        Self::with_sources(env, Arc::new(secrets))
    }

    /// Resolver over explicit sources
    pub fn with_sources(env: Arc<dyn EnvSource>, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            env,
            secrets,
            logger: Arc::new(NoOpLogger::new()),
        }
    }

    /// Replace the logger (silent by default)
    pub fn with_logger(mut self, logger: SharedLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    pub fn secrets(&self) -> &dyn SecretStore {
        self.secrets.as_ref()
    }

    pub fn logger(&self) -> &SharedLogger {
        &self.logger
    }

    /// Resolve a value, `None` when no source has it and there is no default
    pub fn resolve(
        &self,
        var_name: &str,
        secret_name: Option<&str>,
        default: Option<&str>,
    ) -> Option<String> {
        let mut request = ResolutionRequest::new(var_name);
        request.secret_name = secret_name.map(str::to_string);
        request.default = default.map(str::to_string);
        self.resolve_request(&request)
    }

    /// Resolve a prepared request
    pub fn resolve_request(&self, request: &ResolutionRequest) -> Option<String> {
        self.resolve_with_source(request).map(|resolved| resolved.value)
    }

    /// Resolve a request and report which source supplied the value
    pub fn resolve_with_source(&self, request: &ResolutionRequest) -> Option<Resolved> {
        let resolved = self
            .from_file_override(request)
            .or_else(|| self.from_environment(request))
            .or_else(|| self.from_secret_store(request))
            .or_else(|| {
                request
                    .default
                    .as_ref()
                    .map(|value| Resolved::new(value.clone(), ValueSource::Default))
            });

        match &resolved {
            Some(r) => log_debug!(self.logger, "{} resolved from {}", request.var_name, r.source),
            None => log_debug!(self.logger, "{} has no value and no default", request.var_name),
        }
        resolved
    }

    fn from_file_override(&self, request: &ResolutionRequest) -> Option<Resolved> {
        let file_var = request.file_var_name();
        let path = self.env.var_os(&file_var).filter(|p| !p.is_empty())?;
        let path = PathBuf::from(path);

        match read_trimmed(&path) {
            SecretLookup::Found(value) => Some(Resolved::new(value, ValueSource::FileOverride(path))),
            SecretLookup::NotFound => {
                log_debug!(self.logger, "{} points at missing {}, skipping", file_var, path.display());
                None
            }
            SecretLookup::ReadError(e) => {
                log_warn!(self.logger, "{} is set but unreadable, skipping: {}", file_var, e);
                None
            }
        }
    }

    fn from_environment(&self, request: &ResolutionRequest) -> Option<Resolved> {
        self.env
            .var(&request.var_name)
            .map(|value| Resolved::new(value, ValueSource::Environment(request.var_name.clone())))
    }

    fn from_secret_store(&self, request: &ResolutionRequest) -> Option<Resolved> {
        let name = request.secret_file_name();
        match self.secrets.lookup(&name) {
            SecretLookup::Found(value) => Some(Resolved::new(value, ValueSource::SecretFile(name))),
            SecretLookup::NotFound => None,
            SecretLookup::ReadError(e) => {
                log_warn!(self.logger, "secret '{}' in {} store is unreadable: {}", name, self.secrets.name(), e);
                None
            }
        }
    }
}

// Arc<dyn ...> fields have no Debug
impl std::fmt::Debug for ConfigResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigResolver")
            .field("env", &self.env.name())
            .field("secrets", &self.secrets.name())
            .finish()
    }
}
