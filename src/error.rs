//! Error types for eos-api.
//!
//! Transport and device failures are reported as [`ConnectionError`] and
//! wrapped in [`Error::Connection`]; everything else that can go wrong
//! while loading profiles or interpreting responses has its own variant.

use crate::connection::ConnectionError;
use thiserror::Error;

/// Result type alias for eos-api operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for eos-api.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Device Errors
    // ========================================================================
    /// The connection failed or the device rejected a command.
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// The device answered with a different number of results than commands sent.
    #[error("Expected {expected} command results from device, got {actual}")]
    UnexpectedResponse {
        /// Number of commands issued
        expected: usize,
        /// Number of results received
        actual: usize,
    },

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Named connection profile is not defined.
    #[error("Connection profile '{0}' not found")]
    ProfileNotFound(String),

    // ========================================================================
    // IO / Serialization Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Creates a new unexpected response error.
    pub fn unexpected_response(expected: usize, actual: usize) -> Self {
        Self::UnexpectedResponse { expected, actual }
    }

    /// Returns true if this error came from the device connection.
    ///
    /// Reads treat these as "try the next command set" rather than fatal.
    pub fn is_connection(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Returns true if the device itself rejected a command.
    pub fn is_command_error(&self) -> bool {
        matches!(self, Error::Connection(ConnectionError::CommandError { .. }))
    }
}
