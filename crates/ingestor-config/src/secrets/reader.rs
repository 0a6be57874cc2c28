//! Docker secrets directory reader

use std::path::{Path, PathBuf};

use crate::env::EnvSource;
use super::traits::{read_trimmed, SecretLookup, SecretStore};

/// Environment variable naming the secrets directory
pub const SECRETS_DIR_VAR: &str = "DOCKER_SECRETS_DIR";

/// Where Docker and Compose mount secrets by default
pub const DEFAULT_SECRETS_DIR: &str = "/run/secrets";

/// Reads secrets mounted as files, one file per secret
///
/// The secret `odds_api_key` lives at `<secrets_dir>/odds_api_key`. The
/// directory is fixed at construction and may not exist; lookups then simply
/// find nothing. Names are joined as given, callers must not pass names
/// containing `..` or separators.
///
/// # Example
///
/// ```no_run
/// use ingestor_config::env::ProcessEnv;
/// use ingestor_config::secrets::SecretReader;
///
/// let reader = SecretReader::from_env(&ProcessEnv::new());
/// let key = reader.read("odds_api_key");
/// # let _ = key;
/// ```
#[derive(Debug, Clone)]
pub struct SecretReader {
    secrets_dir: PathBuf,
}

impl SecretReader {
    /// Create a reader over a specific directory
    pub fn new(secrets_dir: impl Into<PathBuf>) -> Self {
        Self {
            secrets_dir: secrets_dir.into(),
        }
    }

    /// Create a reader over `DOCKER_SECRETS_DIR`, or `/run/secrets` when unset
    pub fn from_env(env: &dyn EnvSource) -> Self {
        Self::new(env.var_or(SECRETS_DIR_VAR, DEFAULT_SECRETS_DIR))
    }

    /// Get the secrets directory
    pub fn secrets_dir(&self) -> &Path {
        &self.secrets_dir
    }

    /// Path of the file holding a secret
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.secrets_dir.join(name)
    }

    /// Read a secret, `None` if it is missing or unreadable
    pub fn read(&self, name: &str) -> Option<String> {
        self.lookup(name).into_option()
    }
}

impl SecretStore for SecretReader {
    fn name(&self) -> &str {
        "docker-secrets"
    }

    fn lookup(&self, name: &str) -> SecretLookup {
        read_trimmed(&self.path_for(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;
    use crate::env::MemoryEnv;
    use crate::secrets::SecretReadError;

    #[test]
    fn test_reader_name() {
        assert_eq!(SecretReader::new("/tmp").name(), "docker-secrets");
    }

    #[test]
    fn test_from_env_default_dir() {
        let reader = SecretReader::from_env(&MemoryEnv::new());
        assert_eq!(reader.secrets_dir(), Path::new("/run/secrets"));
    }

    #[test]
    fn test_from_env_override_dir() {
        let env = MemoryEnv::new().with_var("DOCKER_SECRETS_DIR", "/tmp/secrets");
        let reader = SecretReader::from_env(&env);
        assert_eq!(reader.secrets_dir(), Path::new("/tmp/secrets"));
        assert_eq!(reader.path_for("odds_api_key"), PathBuf::from("/tmp/secrets/odds_api_key"));
    }

    #[test]
    fn test_read_found_and_stripped() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("football_api_key"), "abc123\n").unwrap();

        let reader = SecretReader::new(dir.path());
        assert_eq!(reader.read("football_api_key"), Some("abc123".to_string()));
        assert!(reader.has("football_api_key"));
    }

    #[test]
    fn test_read_missing_secret() {
        let dir = tempdir().unwrap();
        let reader = SecretReader::new(dir.path());
        assert_eq!(reader.read("betfair_password"), None);
        assert!(matches!(reader.lookup("betfair_password"), SecretLookup::NotFound));
    }

    #[test]
    fn test_read_missing_directory() {
        let dir = tempdir().unwrap();
        let reader = SecretReader::new(dir.path().join("does-not-exist"));
        assert_eq!(reader.read("odds_api_key"), None);
    }

    #[test]
    fn test_read_error_collapses_to_none() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("betfair_username")).unwrap();

        let reader = SecretReader::new(dir.path());
        assert!(matches!(
            reader.lookup("betfair_username"),
            SecretLookup::ReadError(SecretReadError::NotAFile { .. })
        ));
        assert_eq!(reader.read("betfair_username"), None);
        assert!(!reader.has("betfair_username"));
    }

    #[test]
    fn test_read_empty_file_is_found() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("odds_api_key"), "\n").unwrap();

        let reader = SecretReader::new(dir.path());
        assert_eq!(reader.read("odds_api_key"), Some(String::new()));
    }
}
