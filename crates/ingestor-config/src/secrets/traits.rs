//! Core traits and types for secret lookup

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Why a secret that is present could not be read
#[derive(Error, Debug)]
pub enum SecretReadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not valid UTF-8", path.display())]
    InvalidUtf8 { path: PathBuf },

    #[error("{} is not a regular file", path.display())]
    NotAFile { path: PathBuf },
}

/// Outcome of looking up a secret
///
/// Keeps "not there" apart from "there but unreadable" so callers can
/// report the latter. `into_option` collapses both to `None`.
#[derive(Debug)]
pub enum SecretLookup {
    Found(String),
    NotFound,
    ReadError(SecretReadError),
}

impl SecretLookup {
    pub fn is_found(&self) -> bool {
        matches!(self, SecretLookup::Found(_))
    }

    /// Collapse to the value, dropping any read error
    pub fn into_option(self) -> Option<String> {
        match self {
            SecretLookup::Found(value) => Some(value),
            SecretLookup::NotFound | SecretLookup::ReadError(_) => None,
        }
    }
}

/// Read a text file, normalize line endings and strip surrounding whitespace
///
/// Secrets mounted as files usually end with a newline. A missing path is
/// `NotFound`; anything else that stops the read is a `ReadError`.
pub fn read_trimmed(path: &Path) -> SecretLookup {
    match fs::metadata(path) {
        Ok(meta) if meta.is_dir() => {
            return SecretLookup::ReadError(SecretReadError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => return SecretLookup::NotFound,
        Err(source) => {
            return SecretLookup::ReadError(SecretReadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    }

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) => {
            return SecretLookup::ReadError(SecretReadError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    match String::from_utf8(bytes) {
        Ok(text) => SecretLookup::Found(normalize(&text)),
        Err(_) => SecretLookup::ReadError(SecretReadError::InvalidUtf8 {
            path: path.to_path_buf(),
        }),
    }
}

/// Universal newlines, then strip whitespace and the `\x1c`..`\x1f` separators
fn normalize(text: &str) -> String {
    let text = text.replace("\r\n", "\n").replace('\r', "\n");
    text.trim_matches(|c: char| c.is_whitespace() || ('\x1c'..='\x1f').contains(&c))
        .to_string()
}

/// Read-only secret source consulted by the resolver
///
/// Implementations:
/// - `SecretReader`: one file per secret under a secrets directory
/// - `MemorySecretStore`: in-memory, for tests and embedding
pub trait SecretStore: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Look up a secret by name
    fn lookup(&self, name: &str) -> SecretLookup;

    /// Retrieve a secret, treating read errors as absent
    fn get(&self, name: &str) -> Option<String> {
        self.lookup(name).into_option()
    }

    /// Check if a secret is present and readable
    fn has(&self, name: &str) -> bool {
        self.lookup(name).is_found()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_trimmed_strips_newline() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "abc123\n").unwrap();

        match read_trimmed(&path) {
            SecretLookup::Found(value) => assert_eq!(value, "abc123"),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[test]
    fn test_read_trimmed_strips_both_ends() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "  \tsecret value \r\n").unwrap();

        assert_eq!(read_trimmed(&path).into_option(), Some("secret value".to_string()));
    }

    #[test]
    fn test_read_trimmed_normalizes_line_endings() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "a\r\nb\r\n").unwrap();
        assert_eq!(read_trimmed(&path).into_option(), Some("a\nb".to_string()));

        fs::write(&path, "a\rb\r").unwrap();
        assert_eq!(read_trimmed(&path).into_option(), Some("a\nb".to_string()));
    }

    #[test]
    fn test_read_trimmed_strips_separator_controls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        fs::write(&path, "\x1fkey\x1c\n").unwrap();
        assert_eq!(read_trimmed(&path).into_option(), Some("key".to_string()));
    }

    #[test]
    fn test_read_trimmed_missing() {
        let dir = tempdir().unwrap();
        assert!(matches!(read_trimmed(&dir.path().join("missing")), SecretLookup::NotFound));
    }

    #[test]
    fn test_read_trimmed_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            read_trimmed(dir.path()),
            SecretLookup::ReadError(SecretReadError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_read_trimmed_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("binary");
        fs::write(&path, b"\xff\xfe\x00A").unwrap();

        let lookup = read_trimmed(&path);
        assert!(matches!(lookup, SecretLookup::ReadError(SecretReadError::InvalidUtf8 { .. })));
        assert_eq!(lookup.into_option(), None);
    }

    #[test]
    fn test_read_error_message_names_path() {
        let err = SecretReadError::InvalidUtf8 {
            path: PathBuf::from("/run/secrets/odds_api_key"),
        };
        assert_eq!(err.to_string(), "/run/secrets/odds_api_key is not valid UTF-8");
    }
}
