//! Arista eAPI transport
//!
//! Runs commands through the eAPI JSON-RPC endpoint (`/command-api`) over
//! HTTP or HTTPS using a blocking HTTP client.
//!
//! Every request is prefixed with `enable` so show-commands run in
//! privileged mode. Configuration requests are additionally wrapped in
//! `configure` / `end`. Results for the injected commands are stripped
//! before they are returned, so callers always get one result per command
//! they asked for.

use super::{CommandResult, Connection, ConnectionError, ConnectionResult, Encoding};
use crate::config::ConnectionProfile;
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;

// ============================================================================
// Constants
// ============================================================================

/// Default eAPI HTTPS port
pub const EAPI_DEFAULT_HTTPS_PORT: u16 = 443;

/// Default eAPI HTTP port
pub const EAPI_DEFAULT_HTTP_PORT: u16 = 80;

/// Default timeout for eAPI requests (seconds)
pub const EAPI_DEFAULT_TIMEOUT: u64 = 30;

/// Path of the JSON-RPC endpoint
const EAPI_PATH: &str = "/command-api";

// ============================================================================
// Transport Types
// ============================================================================

/// Scheme used to reach the eAPI endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EapiTransport {
    /// HTTPS (default)
    #[default]
    Https,
    /// Plain HTTP
    Http,
}

impl EapiTransport {
    /// URL scheme for this transport
    pub fn scheme(&self) -> &'static str {
        match self {
            EapiTransport::Https => "https",
            EapiTransport::Http => "http",
        }
    }

    /// Port used when none is configured
    pub fn default_port(&self) -> u16 {
        match self {
            EapiTransport::Https => EAPI_DEFAULT_HTTPS_PORT,
            EapiTransport::Http => EAPI_DEFAULT_HTTP_PORT,
        }
    }
}

impl std::str::FromStr for EapiTransport {
    type Err = ConnectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "https" => Ok(EapiTransport::Https),
            "http" => Ok(EapiTransport::Http),
            _ => Err(ConnectionError::InvalidConfig(format!(
                "Invalid transport '{}'. Valid options: https, http",
                s
            ))),
        }
    }
}

// ============================================================================
// eAPI Wire Types
// ============================================================================

/// eAPI JSON-RPC request format
#[derive(Debug, Serialize)]
struct EapiRequest<'a> {
    jsonrpc: &'static str,
    method: &'static str,
    params: EapiParams<'a>,
    id: String,
}

#[derive(Debug, Serialize)]
struct EapiParams<'a> {
    version: u32,
    cmds: Vec<EapiCommand<'a>>,
    format: &'static str,
}

/// eAPI command - a plain string, or an object when the command needs input
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum EapiCommand<'a> {
    Simple(&'a str),
    Complex { cmd: &'a str, input: &'a str },
}

/// eAPI JSON-RPC response format
#[derive(Debug, Deserialize)]
struct EapiResponse {
    #[serde(default)]
    result: Option<Vec<EapiResult>>,
    #[serde(default)]
    error: Option<EapiError>,
}

#[derive(Debug, Deserialize)]
struct EapiResult {
    #[serde(default)]
    output: String,
    #[serde(flatten)]
    extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct EapiError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Vec<EapiErrorData>>,
}

#[derive(Debug, Deserialize)]
struct EapiErrorData {
    #[serde(default)]
    errors: Vec<String>,
}

// ============================================================================
// Connection
// ============================================================================

/// Connection to a single EOS device through eAPI.
pub struct EapiConnection {
    client: Client,
    url: String,
    identifier: String,
    username: String,
    password: String,
    enable_password: Option<String>,
    timeout: u64,
}

impl std::fmt::Debug for EapiConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EapiConnection")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl EapiConnection {
    /// Start building a connection to `host`.
    pub fn builder(host: impl Into<String>) -> EapiConnectionBuilder {
        EapiConnectionBuilder::new(host)
    }

    /// Build a connection from a named configuration profile.
    pub fn from_profile(profile: &ConnectionProfile) -> ConnectionResult<Self> {
        let mut builder = Self::builder(profile.host.clone())
            .username(profile.username.clone())
            .password(profile.password.clone())
            .transport(profile.transport)
            .timeout(profile.timeout)
            .validate_certs(profile.validate_certs);

        if let Some(port) = profile.port {
            builder = builder.port(port);
        }
        if let Some(ref enable_password) = profile.enable_password {
            builder = builder.enable_password(enable_password.clone());
        }

        builder.build()
    }

    /// The full endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Commands injected ahead of every request.
    fn enable_command(&self) -> EapiCommand<'_> {
        match self.enable_password {
            Some(ref input) => EapiCommand::Complex {
                cmd: "enable",
                input: input.as_str(),
            },
            None => EapiCommand::Simple("enable"),
        }
    }

    /// Send one runCmds request and return every result, including the
    /// results for injected commands.
    fn run_commands(
        &self,
        commands: Vec<EapiCommand<'_>>,
        encoding: Encoding,
    ) -> ConnectionResult<Vec<EapiResult>> {
        let expected = commands.len();
        let request = EapiRequest {
            jsonrpc: "2.0",
            method: "runCmds",
            params: EapiParams {
                version: 1,
                cmds: commands,
                format: encoding.as_str(),
            },
            id: uuid::Uuid::new_v4().to_string(),
        };

        debug!(
            connection = %self.identifier,
            id = %request.id,
            commands = expected,
            format = %encoding,
            "Sending eAPI request"
        );

        let response = self
            .client
            .post(&self.url)
            .basic_auth(&self.username, Some(&self.password))
            .json(&request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    ConnectionError::Timeout(self.timeout)
                } else {
                    ConnectionError::ConnectionFailed(format!("eAPI request failed: {}", e))
                }
            })?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ConnectionError::AuthenticationFailed(format!(
                "{} rejected credentials for user '{}'",
                self.identifier, self.username
            )));
        }
        if !status.is_success() {
            return Err(ConnectionError::ConnectionFailed(format!(
                "eAPI returned HTTP {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let eapi_response: EapiResponse = response.json().map_err(|e| {
            ConnectionError::InvalidResponse(format!("Failed to parse eAPI response: {}", e))
        })?;

        if let Some(error) = eapi_response.error {
            let errors = error
                .data
                .map(|d| d.into_iter().flat_map(|ed| ed.errors).collect())
                .unwrap_or_default();
            return Err(ConnectionError::CommandError {
                code: error.code,
                message: error.message,
                errors,
            });
        }

        let results = eapi_response
            .result
            .ok_or_else(|| ConnectionError::InvalidResponse("eAPI returned no result".to_string()))?;

        if results.len() != expected {
            return Err(ConnectionError::InvalidResponse(format!(
                "eAPI returned {} results for {} commands",
                results.len(),
                expected
            )));
        }

        Ok(results)
    }
}

/// Pair each user command with its result.
fn into_command_results(commands: &[String], results: Vec<EapiResult>) -> Vec<CommandResult> {
    commands
        .iter()
        .zip(results)
        .map(|(command, result)| CommandResult {
            command: command.clone(),
            output: result.output,
            data: result.extra,
        })
        .collect()
}

impl Connection for EapiConnection {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn execute(
        &self,
        commands: &[String],
        encoding: Encoding,
    ) -> ConnectionResult<Vec<CommandResult>> {
        let mut cmds = Vec::with_capacity(commands.len() + 1);
        cmds.push(self.enable_command());
        cmds.extend(commands.iter().map(|c| EapiCommand::Simple(c.as_str())));

        let mut results = self.run_commands(cmds, encoding)?;
        let user_results = results.split_off(1);
        Ok(into_command_results(commands, user_results))
    }

    fn config(&self, commands: &[String]) -> ConnectionResult<Vec<CommandResult>> {
        let mut cmds = Vec::with_capacity(commands.len() + 3);
        cmds.push(self.enable_command());
        cmds.push(EapiCommand::Simple("configure"));
        cmds.extend(commands.iter().map(|c| EapiCommand::Simple(c.as_str())));
        cmds.push(EapiCommand::Simple("end"));

        debug!(connection = %self.identifier, ?commands, "Applying configuration");

        let mut results = self.run_commands(cmds, Encoding::Json)?;
        let mut user_results = results.split_off(2);
        user_results.truncate(commands.len());
        Ok(into_command_results(commands, user_results))
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`EapiConnection`].
#[derive(Debug, Clone)]
pub struct EapiConnectionBuilder {
    host: String,
    port: Option<u16>,
    transport: EapiTransport,
    username: String,
    password: String,
    enable_password: Option<String>,
    timeout: u64,
    validate_certs: bool,
}

impl EapiConnectionBuilder {
    /// Create a builder for `host` with default settings.
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: None,
            transport: EapiTransport::default(),
            username: "admin".to_string(),
            password: String::new(),
            enable_password: None,
            timeout: EAPI_DEFAULT_TIMEOUT,
            validate_certs: true,
        }
    }

    /// Set the port (defaults to the transport's standard port)
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the transport scheme
    pub fn transport(mut self, transport: EapiTransport) -> Self {
        self.transport = transport;
        self
    }

    /// Set the username
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set the enable password
    pub fn enable_password(mut self, password: impl Into<String>) -> Self {
        self.enable_password = Some(password.into());
        self
    }

    /// Set the request timeout in seconds
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    /// Whether to validate TLS certificates
    pub fn validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = validate;
        self
    }

    /// Endpoint URL the built connection will post to
    pub fn url(&self) -> String {
        let port = self.port.unwrap_or_else(|| self.transport.default_port());
        format!("{}://{}:{}{}", self.transport.scheme(), self.host, port, EAPI_PATH)
    }

    /// Build the connection.
    pub fn build(self) -> ConnectionResult<EapiConnection> {
        if self.host.trim().is_empty() {
            return Err(ConnectionError::InvalidConfig(
                "eAPI host cannot be empty".to_string(),
            ));
        }

        let url = self.url();
        url::Url::parse(&url).map_err(|e| {
            ConnectionError::InvalidConfig(format!("Invalid eAPI URL '{}': {}", url, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .danger_accept_invalid_certs(!self.validate_certs)
            .build()
            .map_err(|e| {
                ConnectionError::InvalidConfig(format!("Failed to create HTTP client: {}", e))
            })?;

        let port = self.port.unwrap_or_else(|| self.transport.default_port());

        Ok(EapiConnection {
            client,
            identifier: format!("{}@{}:{}", self.username, self.host, port),
            url,
            username: self.username,
            password: self.password,
            enable_password: self.enable_password,
            timeout: self.timeout,
        })
    }
}
