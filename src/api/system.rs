//! Global system settings
//!
//! Reads and writes the node-level settings that identify a device and
//! control global forwarding behavior:
//!
//! - `hostname`: the hostname from the running configuration
//! - `iprouting`: whether IP routing is enabled
//!
//! Reads run two show-commands in text encoding and parse the output. If
//! the device refuses `show hostname` (older EOS releases), the hostname is
//! taken from the running configuration instead.

use super::Entity;
use crate::connection::Connection;
use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Hostname reported when the output has no hostname line
pub const DEFAULT_HOSTNAME: &str = "localhost";

/// Marker printed by `show ip route` when routing is off
const IP_ROUTING_DISABLED: &str = "IP routing not enabled";

/// Show-commands tried first
const PRIMARY_COMMANDS: [&str; 2] = ["show ip route", "show hostname"];

/// Show-commands tried when the primary pair fails
const FALLBACK_COMMANDS: [&str; 2] = ["show ip route", "show running-config | grep hostname"];

/// Matches `hostname foo` and `Hostname: foo` at the start of a line
static HOSTNAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^hostname:?\s+(\S+)").expect("Invalid hostname regex"));

/// Snapshot of the global system settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemResource {
    /// Configured hostname
    pub hostname: String,
    /// Whether IP routing is enabled
    pub iprouting: bool,
}

/// Extract the hostname from command output.
///
/// Returns [`DEFAULT_HOSTNAME`] when no line matches.
pub fn parse_hostname(output: &str) -> String {
    output
        .lines()
        .find_map(|line| HOSTNAME_REGEX.captures(line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_HOSTNAME)
        .trim()
        .to_string()
}

/// Whether `show ip route` output reports routing as enabled.
pub fn parse_iprouting(output: &str) -> bool {
    !output.contains(IP_ROUTING_DISABLED)
}

/// Global system configuration for a node
#[derive(Debug, Clone)]
pub struct System {
    entity: Entity,
}

impl System {
    /// Create a system entity bound to a connection
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            entity: Entity::new(connection),
        }
    }

    /// Read the current system settings.
    ///
    /// Returns `Ok(None)` when neither the primary nor the fallback command
    /// set could be run. Errors that do not come from the connection are
    /// returned as-is.
    pub fn get(&self) -> Result<Option<SystemResource>> {
        let identifier = self.entity.connection().identifier();

        let (ip_route, hostname) = match self.read(&PRIMARY_COMMANDS) {
            Ok(output) => output,
            Err(e) if e.is_connection() => {
                warn!(
                    connection = %identifier,
                    error = %e,
                    "show hostname failed, falling back to running-config"
                );
                match self.read(&FALLBACK_COMMANDS) {
                    Ok(output) => output,
                    Err(e) if e.is_connection() => {
                        warn!(
                            connection = %identifier,
                            error = %e,
                            "Unable to read system configuration"
                        );
                        return Ok(None);
                    }
                    Err(e) => return Err(e),
                }
            }
            Err(e) => return Err(e),
        };

        let resource = SystemResource {
            hostname: parse_hostname(&hostname),
            iprouting: parse_iprouting(&ip_route),
        };
        debug!(connection = %identifier, ?resource, "Read system configuration");

        Ok(Some(resource))
    }

    /// Run a (route, hostname) command pair and return both outputs
    fn read(&self, commands: &[&str; 2]) -> Result<(String, String)> {
        let commands: Vec<String> = commands.iter().map(|c| c.to_string()).collect();
        let [ip_route, hostname]: [String; 2] = self
            .entity
            .show_text(&commands)?
            .try_into()
            .map_err(|outputs: Vec<String>| Error::unexpected_response(2, outputs.len()))?;

        Ok((ip_route, hostname))
    }

    /// Configure the hostname.
    ///
    /// `default` restores the factory hostname and ignores `value`; with no
    /// value the hostname is removed.
    pub fn set_hostname(&self, value: Option<&str>, default: bool) -> Result<bool> {
        let cmd = self.entity.command_builder("hostname", value, default);
        self.entity.configure(vec![cmd])
    }

    /// Enable or disable global IP routing.
    ///
    /// `default` restores the factory setting and ignores `value`; with no
    /// value routing is disabled.
    pub fn set_iprouting(&self, value: Option<bool>, default: bool) -> Result<bool> {
        let cmd = self.entity.command_builder("ip routing", value, default);
        self.entity.configure(vec![cmd])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hostname_running_config() {
        let config = "! device: veos01\nhostname veos01\nip routing\n";
        assert_eq!(parse_hostname(config), "veos01");
    }

    #[test]
    fn test_parse_hostname_show_hostname() {
        let output = "Hostname: veos01\nFQDN:     veos01.example.com\n";
        assert_eq!(parse_hostname(output), "veos01");
    }

    #[test]
    fn test_parse_hostname_without_trailing_newline() {
        assert_eq!(parse_hostname("hostname spine1"), "spine1");
    }

    #[test]
    fn test_parse_hostname_case_insensitive() {
        assert_eq!(parse_hostname("HOSTNAME leaf2\n"), "leaf2");
    }

    #[test]
    fn test_parse_hostname_first_match_wins() {
        let output = "hostname first\nhostname second\n";
        assert_eq!(parse_hostname(output), "first");
    }

    #[test]
    fn test_parse_hostname_defaults() {
        assert_eq!(parse_hostname(""), DEFAULT_HOSTNAME);
        assert_eq!(parse_hostname("ip routing\n"), DEFAULT_HOSTNAME);
        // Must start the line
        assert_eq!(parse_hostname("  ip host hostname foo\n"), DEFAULT_HOSTNAME);
        // Needs a token after the keyword
        assert_eq!(parse_hostname("hostname\n"), DEFAULT_HOSTNAME);
    }

    #[test]
    fn test_parse_iprouting() {
        assert!(!parse_iprouting("! IP routing not enabled\n"));
        assert!(parse_iprouting("Gateway of last resort is not set\n"));
        assert!(parse_iprouting(""));
    }

    #[test]
    fn test_resource_serialization() {
        let resource = SystemResource {
            hostname: "veos01".to_string(),
            iprouting: true,
        };
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json, serde_json::json!({"hostname": "veos01", "iprouting": true}));
    }
}
