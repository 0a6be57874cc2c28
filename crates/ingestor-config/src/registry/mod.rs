//! The data ingestor's configuration registry
//!
//! `ConfigRegistry` resolves every named setting once and is read-only
//! afterwards. `ConfigSnapshot` is its redacted view for logs.

mod settings;
mod snapshot;

pub use settings::{
    ConfigRegistry,
    FOOTBALL_API_URL, ODDS_API_URL, NOT_SET, DAY_LIMIT,
    DEFAULT_MONGO_HOST, DEFAULT_BETFAIR_DATA_DIR,
    FOOTBALL_API_KEY_VAR, ODDS_API_KEY_VAR,
    BETFAIR_API_KEY_VAR, BETFAIR_USERNAME_VAR, BETFAIR_PASSWORD_VAR,
    MONGO_HOST_VAR, BETFAIR_CERT_DIR_VAR,
};
pub use snapshot::{ConfigSnapshot, SecretStatus};
