//! Resolution request and result types

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

/// What to resolve: a variable name, an optional secret name, a default
///
/// # Example
///
/// ```
/// use ingestor_config::ResolutionRequest;
///
/// let request = ResolutionRequest::new("ODDS_API_KEY").with_default("NOT_SET");
/// assert_eq!(request.secret_file_name(), "odds_api_key");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    /// Environment variable name, also the base of `{VAR}_FILE`
    pub var_name: String,
    /// Secret file name; the lowercased variable name when unset or empty
    pub secret_name: Option<String>,
    /// Value used when no source has one
    pub default: Option<String>,
}

impl ResolutionRequest {
    pub fn new(var_name: impl Into<String>) -> Self {
        Self {
            var_name: var_name.into(),
            secret_name: None,
            default: None,
        }
    }

    pub fn with_secret(mut self, secret_name: impl Into<String>) -> Self {
        self.secret_name = Some(secret_name.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Name of the variable holding an explicit file path
    pub fn file_var_name(&self) -> String {
        format!("{}_FILE", self.var_name)
    }

    /// Name looked up in the secret store
    pub fn secret_file_name(&self) -> String {
        match self.secret_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => self.var_name.to_lowercase(),
        }
    }
}

/// Which precedence step supplied a value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "from", rename_all = "snake_case")]
pub enum ValueSource {
    /// Read from the path named by `{VAR}_FILE`
    FileOverride(PathBuf),
    /// Taken verbatim from an environment variable
    Environment(String),
    /// Read from the secret store under this name
    SecretFile(String),
    /// The caller-supplied default
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueSource::FileOverride(path) => write!(f, "file:{}", path.display()),
            ValueSource::Environment(var) => write!(f, "env:{}", var),
            ValueSource::SecretFile(name) => write!(f, "secret:{}", name),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value together with where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: ValueSource,
}

impl Resolved {
    pub fn new(value: impl Into<String>, source: ValueSource) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }
}
