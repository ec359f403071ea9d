//! Connection layer for EOS device communication.
//!
//! This module provides the interface every transport implements so that
//! entities like [`System`](crate::api::system::System) never need to know
//! how commands reach the device.
//!
//! # Overview
//!
//! A [`Connection`] runs an ordered list of commands and returns one
//! [`CommandResult`] per command, in order. Two entry points exist:
//!
//! - [`Connection::execute`]: privileged (enable mode) show-commands
//! - [`Connection::config`]: configuration commands, wrapped in a
//!   `configure` / `end` block by the transport
//!
//! # Supported Transports
//!
//! - **eAPI** (`eapi`): JSON-RPC over HTTP or HTTPS
//!
//! # Example
//!
//! ```rust,ignore
//! use eos_api::connection::{Connection, EapiConnection, Encoding};
//!
//! let conn = EapiConnection::builder("veos01")
//!     .username("admin")
//!     .password("admin")
//!     .build()?;
//!
//! let results = conn.execute(&["show hostname".to_string()], Encoding::Text)?;
//! println!("{}", results[0].output);
//! ```

/// eAPI JSON-RPC transport.
pub mod eapi;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

pub use eapi::{EapiConnection, EapiConnectionBuilder, EapiTransport};

/// Errors that can occur while talking to a device.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Failed to reach the device or complete the HTTP exchange.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Credentials were rejected by the device.
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Request timed out.
    #[error("Connection timeout after {0} seconds")]
    Timeout(u64),

    /// The device accepted the request but rejected one of the commands.
    #[error("Command error {code}: {message}")]
    CommandError {
        /// eAPI error code
        code: i64,
        /// Summary message from the device
        message: String,
        /// Per-command error lines
        errors: Vec<String>,
    },

    /// The response could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Connection settings are invalid or incomplete.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConnectionError {
    /// Creates a new command error.
    pub fn command_error(code: i64, message: impl Into<String>, errors: Vec<String>) -> Self {
        Self::CommandError {
            code,
            message: message.into(),
            errors,
        }
    }
}

/// Result type for connection operations.
pub type ConnectionResult<T> = Result<T, ConnectionError>;

/// Output encoding requested from the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Structured JSON (default)
    #[default]
    Json,
    /// Raw CLI text
    Text,
}

impl Encoding {
    /// Wire name of the encoding.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Text => "text",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Encoding {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Encoding::Json),
            "text" => Ok(Encoding::Text),
            _ => Err(ConnectionError::InvalidConfig(format!(
                "Unknown encoding: {}. Valid options: json, text",
                s
            ))),
        }
    }
}

/// The result of a single command.
///
/// For [`Encoding::Text`] the CLI output lands in `output`; for
/// [`Encoding::Json`] the structured fields land in `data`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandResult {
    /// The command that produced this result.
    pub command: String,
    /// Text output of the command.
    pub output: String,
    /// Structured fields returned by the device.
    pub data: HashMap<String, serde_json::Value>,
}

impl CommandResult {
    /// Create a text result for a command
    pub fn text(command: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            output: output.into(),
            data: HashMap::new(),
        }
    }
}

/// A transport that can run commands on an EOS device.
///
/// Implementations must return exactly one result per command, in the order
/// the commands were given.
pub trait Connection: Send + Sync {
    /// Get a human-readable identifier for this connection (used in logs).
    fn identifier(&self) -> &str;

    /// Run commands in privileged mode and return their results.
    fn execute(
        &self,
        commands: &[String],
        encoding: Encoding,
    ) -> ConnectionResult<Vec<CommandResult>>;

    /// Run configuration commands and return their results.
    fn config(&self, commands: &[String]) -> ConnectionResult<Vec<CommandResult>>;
}
