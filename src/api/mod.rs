//! Configuration entities for EOS devices
//!
//! An entity is a typed view over one area of device configuration. Every
//! entity shares the same plumbing, provided by [`Entity`]:
//!
//! - building a configuration command from a setting name and a
//!   [`CommandMode`] (set a value, enable, negate, or restore the default)
//! - submitting configuration commands and reporting whether the device
//!   accepted them
//!
//! # Command convention
//!
//! | Mode            | Command               |
//! |-----------------|-----------------------|
//! | `Default`       | `default <setting>`   |
//! | `Value(v)`      | `<setting> <v>`       |
//! | `Enable`        | `<setting>`           |
//! | `Disable`       | `no <setting>`        |

pub mod system;

pub use system::{System, SystemResource};

use crate::connection::{Connection, Encoding};
use crate::error::{Error, Result};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a setting should be rendered into a configuration command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandMode {
    /// Restore the factory default (`default <setting>`)
    Default,
    /// Set an explicit value (`<setting> <value>`)
    Value(String),
    /// Turn a flag-style setting on (`<setting>`)
    Enable,
    /// Remove the setting (`no <setting>`)
    Disable,
}

impl CommandMode {
    /// Resolve the optional value / default flag pair entities accept.
    ///
    /// `default` wins over any value; a missing value negates the setting.
    pub fn from_options<V: IntoCommandValue>(value: Option<V>, default: bool) -> Self {
        if default {
            CommandMode::Default
        } else {
            match value {
                Some(v) => v.into_mode(),
                None => CommandMode::Disable,
            }
        }
    }
}

/// Values that can be assigned to a setting.
pub trait IntoCommandValue {
    /// Convert into the command mode the value stands for
    fn into_mode(self) -> CommandMode;
}

impl IntoCommandValue for bool {
    fn into_mode(self) -> CommandMode {
        if self {
            CommandMode::Enable
        } else {
            CommandMode::Disable
        }
    }
}

impl IntoCommandValue for &str {
    fn into_mode(self) -> CommandMode {
        CommandMode::Value(self.to_string())
    }
}

impl IntoCommandValue for String {
    fn into_mode(self) -> CommandMode {
        CommandMode::Value(self)
    }
}

/// Render a configuration command for `setting`.
pub fn build_command(setting: &str, mode: &CommandMode) -> String {
    match mode {
        CommandMode::Default => format!("default {}", setting),
        CommandMode::Value(value) => format!("{} {}", setting, value),
        CommandMode::Enable => setting.to_string(),
        CommandMode::Disable => format!("no {}", setting),
    }
}

/// Shared base for configuration entities.
#[derive(Clone)]
pub struct Entity {
    connection: Arc<dyn Connection>,
}

impl std::fmt::Debug for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entity")
            .field("connection", &self.connection.identifier())
            .finish()
    }
}

impl Entity {
    /// Create an entity bound to a connection
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// The underlying connection
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Build a configuration command using the shared convention
    pub fn command_builder<V: IntoCommandValue>(
        &self,
        setting: &str,
        value: Option<V>,
        default: bool,
    ) -> String {
        build_command(setting, &CommandMode::from_options(value, default))
    }

    /// Run show-commands and return their text output, one entry per command.
    pub fn show_text(&self, commands: &[String]) -> Result<Vec<String>> {
        let results = self.connection.execute(commands, Encoding::Text)?;
        if results.len() != commands.len() {
            return Err(Error::unexpected_response(commands.len(), results.len()));
        }
        Ok(results.into_iter().map(|r| r.output).collect())
    }

    /// Submit configuration commands.
    ///
    /// Returns `Ok(false)` when the device rejects a command; transport
    /// failures are returned as errors.
    pub fn configure(&self, commands: Vec<String>) -> Result<bool> {
        debug!(
            connection = %self.connection.identifier(),
            ?commands,
            "Submitting configuration"
        );

        match self.connection.config(&commands) {
            Ok(_) => Ok(true),
            Err(e) => {
                let err = Error::from(e);
                if err.is_command_error() {
                    warn!(
                        connection = %self.connection.identifier(),
                        error = %err,
                        "Device rejected configuration"
                    );
                    Ok(false)
                } else {
                    Err(err)
                }
            }
        }
    }
}
