//! The data ingestor's settings, resolved once at startup

use once_cell::sync::OnceCell;

use crate::env::EnvSource;
use crate::resolver::{ConfigResolver, ResolutionRequest, Resolved, ValueSource};
use crate::{log_info, log_warn};
use super::snapshot::{ConfigSnapshot, SecretStatus};

pub const FOOTBALL_API_URL: &str = "https://v3.football.api-sports.io/";
pub const ODDS_API_URL: &str = "https://api.the-odds-api.com/v4";

/// Placeholder for API keys nobody configured
pub const NOT_SET: &str = "NOT_SET";

pub const DAY_LIMIT: u32 = 2;

pub const DEFAULT_MONGO_HOST: &str = "localhost";
pub const DEFAULT_BETFAIR_DATA_DIR: &str = "/home/ubuntu/betfair-cert/";

/// Env var read for the football API key. The misspelling is what deployed
/// environments set; `FOOTBALL_API_KEY` is not read.
pub const FOOTBALL_API_KEY_VAR: &str = "FOOTABLL_API_KEY";
pub const ODDS_API_KEY_VAR: &str = "ODDS_API_KEY";
pub const BETFAIR_API_KEY_VAR: &str = "BETFAIR_API_KEY";
pub const BETFAIR_USERNAME_VAR: &str = "BETFAIR_USERNAME";
pub const BETFAIR_PASSWORD_VAR: &str = "BETFAIR_PASSWORD";
pub const MONGO_HOST_VAR: &str = "MONGO_HOST";
pub const BETFAIR_CERT_DIR_VAR: &str = "BETFAIR_CERT_DIR";

static GLOBAL: OnceCell<ConfigRegistry> = OnceCell::new();

/// Immutable set of named settings for the data ingestor
///
/// Built once, then shared by reference. There is no way to refresh a
/// loaded registry; build a new one instead.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use ingestor_config::env::MemoryEnv;
/// use ingestor_config::{ConfigRegistry, ConfigResolver};
///
/// let env = MemoryEnv::new()
///     .with_var("DOCKER_SECRETS_DIR", "/nonexistent")
///     .with_var("MONGO_HOST", "mongo");
/// let config = ConfigRegistry::load_with(&ConfigResolver::with_env(Arc::new(env)));
///
/// assert_eq!(config.mongo_url(), "mongodb://mongo:27017/");
/// assert_eq!(config.odds_api_key(), "NOT_SET");
/// ```
#[derive(Clone)]
pub struct ConfigRegistry {
    football_api_key: String,
    odds_api_key: String,
    betfair_api_key: Option<String>,
    betfair_username: Option<String>,
    betfair_password: Option<String>,
    mongo_host: String,
    mongo_url: String,
    betfair_data_dir: String,
    sources: Vec<(&'static str, ValueSource)>,
}

impl ConfigRegistry {
    /// Load from the process environment and `DOCKER_SECRETS_DIR`
    pub fn load() -> Self {
        Self::load_with(&ConfigResolver::new())
    }

    /// Load through an explicit resolver
    pub fn load_with(resolver: &ConfigResolver) -> Self {
        let mut sources = Vec::new();
        let mut track = |name: &'static str, resolved: Option<Resolved>| {
            resolved.map(|r| {
                sources.push((name, r.source));
                r.value
            })
        };

        let football_api_key = track(
            "FOOTBALL_API_KEY",
            resolver.resolve_with_source(
                &ResolutionRequest::new(FOOTBALL_API_KEY_VAR)
                    .with_secret("football_api_key")
                    .with_default(NOT_SET),
            ),
        )
        .unwrap_or_else(|| NOT_SET.to_string());

        let odds_api_key = track(
            "ODDS_API_KEY",
            resolver.resolve_with_source(
                &ResolutionRequest::new(ODDS_API_KEY_VAR)
                    .with_secret("odds_api_key")
                    .with_default(NOT_SET),
            ),
        )
        .unwrap_or_else(|| NOT_SET.to_string());

        let betfair_api_key = track(
            "BETFAIR_API_KEY",
            resolver.resolve_with_source(
                &ResolutionRequest::new(BETFAIR_API_KEY_VAR).with_secret("betfair_api_key"),
            ),
        );
        let betfair_username = track(
            "BETFAIR_USERNAME",
            resolver.resolve_with_source(
                &ResolutionRequest::new(BETFAIR_USERNAME_VAR).with_secret("betfair_username"),
            ),
        );
        let betfair_password = track(
            "BETFAIR_PASSWORD",
            resolver.resolve_with_source(
                &ResolutionRequest::new(BETFAIR_PASSWORD_VAR).with_secret("betfair_password"),
            ),
        );

        // Plain env lookups: no _FILE override, no secret file
        let Resolved { value: mongo_host, source } =
            env_or_default(resolver.env(), MONGO_HOST_VAR, DEFAULT_MONGO_HOST);
        sources.push(("MONGO_HOST", source));
        let Resolved { value: betfair_data_dir, source } =
            env_or_default(resolver.env(), BETFAIR_CERT_DIR_VAR, DEFAULT_BETFAIR_DATA_DIR);
        sources.push(("BETFAIR_DATA_DIR", source));

        let mongo_url = format!("mongodb://{}:27017/", mongo_host);

        let registry = Self {
            football_api_key,
            odds_api_key,
            betfair_api_key,
            betfair_username,
            betfair_password,
            mongo_host,
            mongo_url,
            betfair_data_dir,
            sources,
        };

        let logger = resolver.logger();
        for (name, source) in &registry.sources {
            log_info!(logger, "{} <- {}", name, source);
        }
        let unconfigured = registry.unconfigured();
        if !unconfigured.is_empty() {
            log_warn!(logger, "credentials not configured: {}", unconfigured.join(", "));
        }

        registry
    }

    /// Process-wide registry, loaded from the process environment on first call
    pub fn init() -> &'static ConfigRegistry {
        GLOBAL.get_or_init(Self::load)
    }

    /// Process-wide registry, loaded through `resolver` if not yet initialized
    ///
    /// Once initialized, later calls return the existing registry and
    /// ignore `resolver`.
    pub fn init_with(resolver: &ConfigResolver) -> &'static ConfigRegistry {
        GLOBAL.get_or_init(|| Self::load_with(resolver))
    }

    /// The process-wide registry, if `init` has run
    pub fn global() -> Option<&'static ConfigRegistry> {
        GLOBAL.get()
    }

    pub fn football_api_url(&self) -> &str {
        FOOTBALL_API_URL
    }

    pub fn odds_api_url(&self) -> &str {
        ODDS_API_URL
    }

    /// `NOT_SET` when not configured
    pub fn football_api_key(&self) -> &str {
        &self.football_api_key
    }

    /// `NOT_SET` when not configured
    pub fn odds_api_key(&self) -> &str {
        &self.odds_api_key
    }

    pub fn betfair_api_key(&self) -> Option<&str> {
        self.betfair_api_key.as_deref()
    }

    pub fn betfair_username(&self) -> Option<&str> {
        self.betfair_username.as_deref()
    }

    pub fn betfair_password(&self) -> Option<&str> {
        self.betfair_password.as_deref()
    }

    pub fn mongo_host(&self) -> &str {
        &self.mongo_host
    }

    /// `mongodb://{mongo_host}:27017/`
    pub fn mongo_url(&self) -> &str {
        &self.mongo_url
    }

    /// Betfair certificate directory, from `BETFAIR_CERT_DIR`
    pub fn betfair_data_dir(&self) -> &str {
        &self.betfair_data_dir
    }

    pub fn day_limit(&self) -> u32 {
        DAY_LIMIT
    }

    /// Where each resolved setting came from, in load order
    pub fn sources(&self) -> &[(&'static str, ValueSource)] {
        &self.sources
    }

    pub fn source_of(&self, setting: &str) -> Option<&ValueSource> {
        self.sources
            .iter()
            .find(|(name, _)| *name == setting)
            .map(|(_, source)| source)
    }

    /// Credential settings left at `NOT_SET` or absent
    ///
    /// Only a report; loading never fails because of it.
    pub fn unconfigured(&self) -> Vec<&'static str> {
        self.credentials()
            .into_iter()
            .filter(|(_, value)| !is_configured(*value))
            .map(|(name, _)| name)
            .collect()
    }

    /// A redacted, serializable view for startup logs
    pub fn snapshot(&self) -> ConfigSnapshot {
        let secrets = self
            .credentials()
            .into_iter()
            .map(|(name, value)| SecretStatus {
                name,
                configured: is_configured(value),
                source: self.source_of(name).cloned(),
            })
            .collect();

        ConfigSnapshot {
            football_api_url: self.football_api_url().to_string(),
            odds_api_url: self.odds_api_url().to_string(),
            mongo_host: self.mongo_host.clone(),
            mongo_url: self.mongo_url.clone(),
            betfair_data_dir: self.betfair_data_dir.clone(),
            day_limit: self.day_limit(),
            secrets,
        }
    }

    fn credentials(&self) -> [(&'static str, Option<&str>); 5] {
        [
            ("FOOTBALL_API_KEY", Some(self.football_api_key.as_str())),
            ("ODDS_API_KEY", Some(self.odds_api_key.as_str())),
            ("BETFAIR_API_KEY", self.betfair_api_key.as_deref()),
            ("BETFAIR_USERNAME", self.betfair_username.as_deref()),
            ("BETFAIR_PASSWORD", self.betfair_password.as_deref()),
        ]
    }
}

fn env_or_default(env: &dyn EnvSource, var: &str, default: &str) -> Resolved {
    match env.var(var) {
        Some(value) => Resolved::new(value, ValueSource::Environment(var.to_string())),
        None => Resolved::new(default, ValueSource::Default),
    }
}

fn is_configured(value: Option<&str>) -> bool {
    matches!(value, Some(v) if v != NOT_SET)
}

fn redact(value: Option<&str>) -> &'static str {
    match value {
        None => "<unset>",
        Some(NOT_SET) => NOT_SET,
        Some(_) => "<redacted>",
    }
}

// Keep secrets out of `{:?}` output
impl std::fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("football_api_url", &FOOTBALL_API_URL)
            .field("odds_api_url", &ODDS_API_URL)
            .field("football_api_key", &redact(Some(self.football_api_key.as_str())))
            .field("odds_api_key", &redact(Some(self.odds_api_key.as_str())))
            .field("betfair_api_key", &redact(self.betfair_api_key.as_deref()))
            .field("betfair_username", &redact(self.betfair_username.as_deref()))
            .field("betfair_password", &redact(self.betfair_password.as_deref()))
            .field("mongo_host", &self.mongo_host)
            .field("mongo_url", &self.mongo_url)
            .field("betfair_data_dir", &self.betfair_data_dir)
            .field("day_limit", &DAY_LIMIT)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use crate::env::MemoryEnv;
    use crate::secrets::MemorySecretStore;

    fn load(env: MemoryEnv, secrets: MemorySecretStore) -> ConfigRegistry {
        ConfigRegistry::load_with(&ConfigResolver::with_sources(Arc::new(env), Arc::new(secrets)))
    }

    #[test]
    fn test_defaults_with_nothing_configured() {
        let config = load(MemoryEnv::new(), MemorySecretStore::new());

        assert_eq!(config.football_api_url(), "https://v3.football.api-sports.io/");
        assert_eq!(config.odds_api_url(), "https://api.the-odds-api.com/v4");
        assert_eq!(config.football_api_key(), NOT_SET);
        assert_eq!(config.odds_api_key(), NOT_SET);
        assert_eq!(config.betfair_api_key(), None);
        assert_eq!(config.betfair_username(), None);
        assert_eq!(config.betfair_password(), None);
        assert_eq!(config.mongo_host(), "localhost");
        assert_eq!(config.mongo_url(), "mongodb://localhost:27017/");
        assert_eq!(config.betfair_data_dir(), "/home/ubuntu/betfair-cert/");
        assert_eq!(config.day_limit(), 2);
    }

    #[test]
    fn test_mongo_url_derived_from_host() {
        let env = MemoryEnv::new().with_var("MONGO_HOST", "mongo.internal");
        let config = load(env, MemorySecretStore::new());

        assert_eq!(config.mongo_host(), "mongo.internal");
        assert_eq!(config.mongo_url(), "mongodb://mongo.internal:27017/");
        assert_eq!(
            config.source_of("MONGO_HOST"),
            Some(&ValueSource::Environment("MONGO_HOST".to_string()))
        );
    }

    #[test]
    fn test_mongo_host_ignores_secret_store() {
        let secrets = MemorySecretStore::new().with_secret("mongo_host", "from-secret");
        let config = load(MemoryEnv::new(), secrets);
        assert_eq!(config.mongo_host(), "localhost");
        assert_eq!(config.source_of("MONGO_HOST"), Some(&ValueSource::Default));
    }

    #[test]
    fn test_betfair_data_dir_from_cert_dir_var() {
        let env = MemoryEnv::new().with_var("BETFAIR_CERT_DIR", "/certs/");
        let config = load(env, MemorySecretStore::new());
        assert_eq!(config.betfair_data_dir(), "/certs/");
    }

    #[test]
    fn test_credentials_from_secret_store() {
        let secrets = MemorySecretStore::new()
            .with_secret("football_api_key", "fk")
            .with_secret("odds_api_key", "ok")
            .with_secret("betfair_api_key", "bk")
            .with_secret("betfair_username", "punter")
            .with_secret("betfair_password", "hunter2");
        let config = load(MemoryEnv::new(), secrets);

        assert_eq!(config.football_api_key(), "fk");
        assert_eq!(config.odds_api_key(), "ok");
        assert_eq!(config.betfair_api_key(), Some("bk"));
        assert_eq!(config.betfair_username(), Some("punter"));
        assert_eq!(config.betfair_password(), Some("hunter2"));
        assert!(config.unconfigured().is_empty());
        assert_eq!(
            config.source_of("BETFAIR_PASSWORD"),
            Some(&ValueSource::SecretFile("betfair_password".to_string()))
        );
    }

    #[test]
    fn test_football_key_reads_misspelled_var() {
        // FOOTABLL_API_KEY is what deployments set; the correctly spelled name is ignored
        let env = MemoryEnv::new().with_var("FOOTBALL_API_KEY", "correct-spelling");
        let config = load(env, MemorySecretStore::new());
        assert_eq!(config.football_api_key(), NOT_SET);

        let env = MemoryEnv::new().with_var("FOOTABLL_API_KEY", "misspelled");
        let config = load(env, MemorySecretStore::new());
        assert_eq!(config.football_api_key(), "misspelled");
    }

    #[test]
    fn test_unconfigured_lists_missing_credentials() {
        let env = MemoryEnv::new().with_var("ODDS_API_KEY", "ok");
        let secrets = MemorySecretStore::new().with_secret("betfair_username", "punter");
        let config = load(env, secrets);

        assert_eq!(
            config.unconfigured(),
            vec!["FOOTBALL_API_KEY", "BETFAIR_API_KEY", "BETFAIR_PASSWORD"]
        );
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let env = MemoryEnv::new()
            .with_var("ODDS_API_KEY", "odds-secret-value")
            .with_var("BETFAIR_PASSWORD", "hunter2");
        let config = load(env, MemorySecretStore::new());

        let debug = format!("{:?}", config);
        assert!(!debug.contains("odds-secret-value"));
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
        assert!(debug.contains("NOT_SET"));
        assert!(debug.contains("<unset>"));
        assert!(debug.contains("mongodb://localhost:27017/"));
    }

    #[test]
    fn test_snapshot_is_redacted() {
        let env = MemoryEnv::new().with_var("BETFAIR_API_KEY", "bk-secret");
        let config = load(env, MemorySecretStore::new());

        let snapshot = config.snapshot();
        let betfair = snapshot
            .secrets
            .iter()
            .find(|s| s.name == "BETFAIR_API_KEY")
            .unwrap();
        assert!(betfair.configured);
        assert_eq!(betfair.source, Some(ValueSource::Environment("BETFAIR_API_KEY".to_string())));

        let football = snapshot.secrets.iter().find(|s| s.name == "FOOTBALL_API_KEY").unwrap();
        assert!(!football.configured);
        assert_eq!(football.source, Some(ValueSource::Default));

        let json = snapshot.to_json().unwrap();
        assert!(!json.contains("bk-secret"));
        assert!(json.contains("mongodb://localhost:27017/"));
    }

    #[test]
    fn test_sources_in_load_order() {
        let config = load(MemoryEnv::new(), MemorySecretStore::new());
        let names: Vec<_> = config.sources().iter().map(|(n, _)| *n).collect();
        // Betfair credentials without a default resolve to nothing and have no source
        assert_eq!(
            names,
            vec!["FOOTBALL_API_KEY", "ODDS_API_KEY", "MONGO_HOST", "BETFAIR_DATA_DIR"]
        );
    }
}
