//! Error types for the mock connection
//!
//! This module defines every error a mocked call can produce.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! Errors are `Clone + PartialEq` because an injected error is stored in an
//! outcome queue and handed back to the caller verbatim, possibly many times.

use thiserror::Error;

/// Result type alias for mock operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by a mocked connection
///
/// # Categories
///
/// | Category | Variants | Description |
/// |----------|----------|-------------|
/// | Resolution | `Unregistered`, `NoQueuedCalls` | No expectation answers the call |
/// | Keyspace | `WrongType`, `InvalidInput` | Simulated store rejected the call |
/// | Injected | `Reply` | Error registered by a test |
/// | Verification | `ExpectationsNotMet` | Registered commands never called |
/// | Setup | `Config` | Configuration could not be loaded |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    // ==================== Resolution ====================
    /// No registered expectation matches the call
    #[error("command {name} with arguments {args} not registered{}", format_suggestions(.suggestions))]
    Unregistered {
        /// Command name as called
        name: String,
        /// Display form of the called arguments
        args: String,
        /// Argument patterns of registrations sharing the same name
        suggestions: Vec<String>,
    },

    /// `receive` was called with nothing in the pipeline
    #[error("no queued calls")]
    NoQueuedCalls,

    // ==================== Keyspace ====================
    /// Key holds a container of a different kind
    #[error("wrong type for key '{key}': expected {expected}, got {actual}")]
    WrongType {
        /// Key that was addressed
        key: String,
        /// Kind the operation works on
        expected: String,
        /// Kind currently stored under the key
        actual: String,
    },

    /// Malformed arguments for a simulated command
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the arguments
        reason: String,
    },

    // ==================== Injected ====================
    /// Error reply registered by a test
    #[error("{0}")]
    Reply(String),

    // ==================== Verification ====================
    /// Some registered commands were never called
    #[error("expectations not met, never called: {}", .commands.join(", "))]
    ExpectationsNotMet {
        /// Identity of each uncalled command
        commands: Vec<String>,
    },

    // ==================== Setup ====================
    /// Configuration could not be read or parsed
    #[error("config error: {reason}")]
    Config {
        /// Underlying failure
        reason: String,
    },
}

impl Error {
    /// Build an injected error reply
    pub fn reply(message: impl Into<String>) -> Self {
        Error::Reply(message.into())
    }

    /// Build an invalid-input error
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Error::InvalidInput {
            reason: reason.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        return String::new();
    }
    format!(
        "; registered argument patterns for this command: {}",
        suggestions.join(" | ")
    )
}
