//! Connection configuration via TOML
//!
//! A mocked connection is normally built with [`Conn::new`](crate::Conn::new).
//! Suites that share settings across many tests can keep them in a TOML file
//! and build connections with [`Conn::with_config`](crate::Conn::with_config).

use std::path::Path;

use redimock_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Mocked connection settings.
///
/// # Example
///
/// ```toml
/// # Block `receive` until a signal is delivered (pub/sub loops)
/// receive_wait = false
///
/// # List same-name registrations in unregistered-command errors
/// suggest_similar = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnConfig {
    /// Start in wait-for-signal receive mode.
    pub receive_wait: bool,
    /// Include same-name registrations in unregistered-command errors.
    pub suggest_similar: bool,
}

impl Default for ConnConfig {
    fn default() -> Self {
        Self {
            receive_wait: false,
            suggest_similar: true,
        }
    }
}

impl ConnConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Mocked connection configuration
#
# Block `receive` until a signal is delivered with `receive_now()`.
# Used to simulate subscribe/listen loops.
receive_wait = false

# List the argument patterns of same-name registrations when a call
# matches no registered command.
suggest_similar = true
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML for this config.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config: {}", e),
        })
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => Error::Config {
                reason: format!("{} ({})", reason, path.display()),
            },
            other => other,
        })
    }

    /// Serialize this config to TOML text.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::Config {
            reason: format!("Failed to serialize config: {}", e),
        })
    }
}
