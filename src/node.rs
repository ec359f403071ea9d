//! Node - a single EOS device
//!
//! A [`Node`] owns a shared connection and hands out entities bound to it.

use crate::api::System;
use crate::config::Config;
use crate::connection::{CommandResult, Connection, EapiConnection, Encoding};
use crate::error::Result;
use std::sync::Arc;
use tracing::debug;

/// A device reachable through a [`Connection`]
#[derive(Clone)]
pub struct Node {
    connection: Arc<dyn Connection>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("connection", &self.connection.identifier())
            .finish()
    }
}

impl Node {
    /// Wrap an existing connection
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Open an eAPI connection using the named profile from `config`
    pub fn connect_to(name: &str, config: &Config) -> Result<Self> {
        let profile = config.profile(name)?;
        let connection = EapiConnection::from_profile(profile)?;
        debug!(profile = %name, connection = %connection.identifier(), "Connected to node");
        Ok(Self::new(Arc::new(connection)))
    }

    /// Identifier of the underlying connection
    pub fn identifier(&self) -> &str {
        self.connection.identifier()
    }

    /// Run privileged show-commands
    pub fn enable(&self, commands: &[String], encoding: Encoding) -> Result<Vec<CommandResult>> {
        Ok(self.connection.execute(commands, encoding)?)
    }

    /// Run configuration commands
    pub fn config(&self, commands: &[String]) -> Result<Vec<CommandResult>> {
        Ok(self.connection.config(commands)?)
    }

    /// Global system settings of this node
    pub fn system(&self) -> System {
        System::new(Arc::clone(&self.connection))
    }
}
