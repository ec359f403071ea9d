//! Configuration module for eos-api
//!
//! Handles loading and merging connection profiles from multiple sources:
//! - Default values
//! - User configuration (~/.eos-api.toml, ~/.eos-api/config)
//! - Project configuration (./eos-api.toml)
//! - An explicit path or the `EOS_API_CONFIG` environment variable
//! - Environment variable overrides
//!
//! A profile file looks like:
//!
//! ```toml
//! [connections.veos01]
//! host = "192.168.1.16"
//! username = "admin"
//! password = "admin"
//! transport = "https"
//!
//! [logging]
//! log_level = "debug"
//! ```

use crate::connection::eapi::EAPI_DEFAULT_TIMEOUT;
use crate::connection::EapiTransport;
use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Named connection profiles
    pub connections: IndexMap<String, ConnectionProfile>,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Settings for reaching one device
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionProfile {
    /// Device address; the profile name is used when empty
    pub host: String,

    /// eAPI username
    pub username: String,

    /// eAPI password
    pub password: String,

    /// Password for the `enable` command
    pub enable_password: Option<String>,

    /// HTTP or HTTPS
    pub transport: EapiTransport,

    /// Port override
    pub port: Option<u16>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Validate TLS certificates
    pub validate_certs: bool,
}

impl Default for ConnectionProfile {
    fn default() -> Self {
        Self {
            host: String::new(),
            username: "admin".to_string(),
            password: String::new(),
            enable_password: None,
            transport: EapiTransport::default(),
            port: None,
            timeout: EAPI_DEFAULT_TIMEOUT,
            validate_certs: true,
        }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,

    /// Include the event target in log lines
    pub with_target: bool,

    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            with_target: false,
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        let mut config = Config::default();

        for path in Self::get_config_paths(config_path) {
            if path.exists() {
                config = config.merge_from_file(&path)?;
            }
        }

        config.apply_env_overrides();
        config.fill_hosts();

        Ok(config)
    }

    /// Load from a specific file only
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let mut config = Config::default().merge_from_file(path.as_ref())?;
        config.fill_hosts();
        Ok(config)
    }

    /// Get the list of configuration file paths to check
    fn get_config_paths(explicit_path: Option<&PathBuf>) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Some(path) = explicit_path {
            paths.push(path.clone());
            return paths;
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".eos-api.toml"));
            paths.push(home.join(".eos-api/config"));
        }

        paths.push(PathBuf::from("eos-api.toml"));

        if let Ok(env_config) = std::env::var("EOS_API_CONFIG") {
            paths.push(PathBuf::from(env_config));
        }

        paths
    }

    /// Merge configuration from a file
    fn merge_from_file(&self, path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let file_config: Config = match extension {
            "yml" | "yaml" => serde_yaml::from_str(&content)?,
            "json" => serde_json::from_str(&content)?,
            "toml" => toml::from_str(&content)?,
            _ => toml::from_str(&content)
                .or_else(|_| serde_yaml::from_str(&content))
                .map_err(|e| {
                    Error::Config(format!(
                        "Failed to parse config file {}: {}",
                        path.display(),
                        e
                    ))
                })?,
        };

        Ok(self.merge(file_config))
    }

    /// Merge another config into this one; profiles are replaced by name
    fn merge(&self, other: Config) -> Config {
        let mut connections = self.connections.clone();
        connections.extend(other.connections);

        Config {
            connections,
            logging: if other.logging != LoggingConfig::default() {
                other.logging
            } else {
                self.logging.clone()
            },
        }
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // EOS_API_USERNAME
        if let Ok(user) = std::env::var("EOS_API_USERNAME") {
            for profile in self.connections.values_mut() {
                profile.username = user.clone();
            }
        }

        // EOS_API_PASSWORD
        if let Ok(password) = std::env::var("EOS_API_PASSWORD") {
            for profile in self.connections.values_mut() {
                profile.password = password.clone();
            }
        }

        // EOS_API_TIMEOUT
        if let Ok(timeout) = std::env::var("EOS_API_TIMEOUT") {
            if let Ok(n) = timeout.parse() {
                for profile in self.connections.values_mut() {
                    profile.timeout = n;
                }
            }
        }

        // EOS_API_LOG_LEVEL
        if let Ok(level) = std::env::var("EOS_API_LOG_LEVEL") {
            self.logging.log_level = level;
        }
    }

    fn fill_hosts(&mut self) {
        for (name, profile) in self.connections.iter_mut() {
            if profile.host.is_empty() {
                profile.host = name.clone();
            }
        }
    }

    /// Look up a connection profile by name
    pub fn profile(&self, name: &str) -> Result<&ConnectionProfile> {
        self.connections
            .get(name)
            .ok_or_else(|| Error::ProfileNotFound(name.to_string()))
    }

    /// Names of all configured profiles, in file order
    pub fn profile_names(&self) -> Vec<&str> {
        self.connections.keys().map(String::as_str).collect()
    }
}

/// Install a global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Calling this more
/// than once returns an error instead of replacing the first subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let json_layer = config
        .json
        .then(|| fmt::layer().json().with_target(config.with_target));
    let text_layer = (!config.json).then(|| fmt::layer().with_target(config.with_target));

    tracing_subscriber::registry()
        .with(json_layer)
        .with(text_layer)
        .with(env_filter)
        .try_init()
        .map_err(|e| Error::Config(format!("Failed to initialize logging: {}", e)))
}
