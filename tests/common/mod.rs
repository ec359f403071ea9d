//! Shared test utilities and fixtures for the eos-api test suite.
//!
//! This module provides:
//! - A mock [`Connection`] that records command batches and replays
//!   canned output
//! - Sample device output fixtures
//!
//! # Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use eos_api::connection::{
    CommandResult, Connection, ConnectionError, ConnectionResult, Encoding,
};

// ============================================================================
// Fixtures
// ============================================================================

/// `show ip route` output with routing enabled
pub const ROUTES_ENABLED: &str = "\
VRF: default
Codes: C - connected, S - static, K - kernel,
       O - OSPF, IA - OSPF inter area, B - BGP

Gateway of last resort is not set

 C      10.0.0.0/24 is directly connected, Ethernet1
";

/// `show ip route` output with routing disabled
pub const ROUTES_DISABLED: &str = "\
VRF: default
! IP routing not enabled
Gateway of last resort is not set

 C      10.0.0.0/24 is directly connected, Ethernet1
";

/// `show hostname` output
pub const SHOW_HOSTNAME: &str = "Hostname: veos01\nFQDN:     veos01.example.com\n";

/// `show running-config | grep hostname` output
pub const RUNNING_CONFIG_HOSTNAME: &str = "hostname veos-legacy\n";

// ============================================================================
// Mock Connection Implementation
// ============================================================================

/// A mock connection for testing purposes.
///
/// Tracks every command batch sent through `execute` and `config`, and
/// returns configured output per command.
///
/// # Example
///
/// ```rust,ignore
/// let mock = MockConnection::new("veos01");
/// mock.set_output("show hostname", "Hostname: veos01\n");
///
/// let results = mock.execute(&["show hostname".into()], Encoding::Text).unwrap();
/// assert_eq!(mock.execute_batches().len(), 1);
/// ```
#[derive(Debug)]
pub struct MockConnection {
    identifier: String,
    outputs: RwLock<HashMap<String, String>>,
    rejected_commands: RwLock<HashSet<String>>,
    execute_batches: RwLock<Vec<Vec<String>>>,
    config_batches: RwLock<Vec<Vec<String>>>,
    encodings: RwLock<Vec<Encoding>>,
    should_fail: AtomicBool,
    reject_config: AtomicBool,
    short_response: AtomicBool,
    request_count: AtomicU32,
}

impl MockConnection {
    /// Create a new mock connection with the given identifier.
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            outputs: RwLock::new(HashMap::new()),
            rejected_commands: RwLock::new(HashSet::new()),
            execute_batches: RwLock::new(Vec::new()),
            config_batches: RwLock::new(Vec::new()),
            encodings: RwLock::new(Vec::new()),
            should_fail: AtomicBool::new(false),
            reject_config: AtomicBool::new(false),
            short_response: AtomicBool::new(false),
            request_count: AtomicU32::new(0),
        }
    }

    /// A mock already wrapped for use as `Arc<dyn Connection>`.
    pub fn shared(identifier: impl Into<String>) -> Arc<Self> {
        Arc::new(Self::new(identifier))
    }

    /// Set the text output for a specific command.
    pub fn set_output(&self, command: impl Into<String>, output: impl Into<String>) {
        self.outputs.write().insert(command.into(), output.into());
    }

    /// Make the device reject any batch containing `command`.
    pub fn reject_command(&self, command: impl Into<String>) {
        self.rejected_commands.write().insert(command.into());
    }

    /// Fail every request at the transport level.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Make the device reject every configuration batch.
    pub fn set_reject_config(&self, reject: bool) {
        self.reject_config.store(reject, Ordering::SeqCst);
    }

    /// Return one result fewer than commands sent.
    pub fn set_short_response(&self, short: bool) {
        self.short_response.store(short, Ordering::SeqCst);
    }

    /// Number of requests (execute + config) received.
    pub fn request_count(&self) -> u32 {
        self.request_count.load(Ordering::SeqCst)
    }

    /// Every batch passed to `execute`, in order.
    pub fn execute_batches(&self) -> Vec<Vec<String>> {
        self.execute_batches.read().clone()
    }

    /// Every batch passed to `config`, in order.
    pub fn config_batches(&self) -> Vec<Vec<String>> {
        self.config_batches.read().clone()
    }

    /// Encodings requested by `execute` calls, in order.
    pub fn encodings(&self) -> Vec<Encoding> {
        self.encodings.read().clone()
    }

    fn check_should_fail(&self) -> ConnectionResult<()> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(ConnectionError::ConnectionFailed(
                "Mock connection failed".to_string(),
            ));
        }
        Ok(())
    }

    fn results_for(&self, commands: &[String]) -> Vec<CommandResult> {
        let outputs = self.outputs.read();
        let mut results: Vec<CommandResult> = commands
            .iter()
            .map(|cmd| {
                CommandResult::text(cmd.clone(), outputs.get(cmd).cloned().unwrap_or_default())
            })
            .collect();
        if self.short_response.load(Ordering::SeqCst) {
            results.pop();
        }
        results
    }
}

impl Connection for MockConnection {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn execute(
        &self,
        commands: &[String],
        encoding: Encoding,
    ) -> ConnectionResult<Vec<CommandResult>> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.execute_batches.write().push(commands.to_vec());
        self.encodings.write().push(encoding);
        self.check_should_fail()?;

        let rejected = self.rejected_commands.read();
        if let Some(pos) = commands.iter().position(|c| rejected.contains(c)) {
            return Err(ConnectionError::command_error(
                1002,
                format!(
                    "CLI command {} of {} '{}' failed: invalid command",
                    pos + 1,
                    commands.len(),
                    commands[pos]
                ),
                vec!["Invalid input".to_string()],
            ));
        }

        Ok(self.results_for(commands))
    }

    fn config(&self, commands: &[String]) -> ConnectionResult<Vec<CommandResult>> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        self.config_batches.write().push(commands.to_vec());
        self.check_should_fail()?;

        if self.reject_config.load(Ordering::SeqCst) {
            return Err(ConnectionError::command_error(
                1002,
                "CLI command 3 of 4 failed: invalid command",
                vec!["% Invalid input".to_string()],
            ));
        }

        Ok(self.results_for(commands))
    }
}

/// A mock device answering the primary read commands.
pub fn device_with_hostname(routes: &str) -> Arc<MockConnection> {
    let mock = MockConnection::shared("veos01");
    mock.set_output("show ip route", routes);
    mock.set_output("show hostname", SHOW_HOSTNAME);
    mock.set_output("show running-config | grep hostname", RUNNING_CONFIG_HOSTNAME);
    mock
}
