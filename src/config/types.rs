//! Configuration types and CLI options.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use clap::{Parser, ValueEnum};
use thiserror::Error;
use url::Url;

use crate::config::constants::{DEFAULT_SCHEME, DEFAULT_SERVERS, DEFAULT_TIMEOUT_SECS};

/// Logging level for the application.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// One address family's lookup server: a family tag paired with the host the
/// `/json` request goes to. Parsed once from configuration and immutable
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyEndpoint {
    /// Address-family tag, e.g. "IPv4" or "IPv6". Also sent as the `family`
    /// query parameter and used to label results.
    pub family: String,
    /// Server host (and optional port) the lookup request is sent to.
    pub base_url: String,
}

impl FromStr for FamilyEndpoint {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((family, base_url)) = s.split_once('=') else {
            return Err(format!("expected FAMILY=HOST, got '{s}'"));
        };
        if family.is_empty() || base_url.is_empty() {
            return Err(format!(
                "both family and host must be non-empty in '{s}'"
            ));
        }
        Ok(Self {
            family: family.to_string(),
            base_url: base_url.to_string(),
        })
    }
}

impl fmt::Display for FamilyEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.family, self.base_url)
    }
}

/// A field-scoped configuration validation error.
#[derive(Debug, Error)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    /// Name of the configuration field that failed validation.
    pub field: &'static str,
    /// Human-readable description of what is wrong with it.
    pub message: String,
}

/// Configuration for a lookup run.
///
/// Parsed from the command line in the binary, or constructed
/// programmatically when embedding the library.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "addr_lookup",
    version,
    about = "Queries address lookup servers concurrently and reports the observed client address"
)]
pub struct Config {
    /// Lookup server for one address family, as FAMILY=HOST. Repeatable.
    #[arg(long = "server", value_name = "FAMILY=HOST", default_values = DEFAULT_SERVERS)]
    pub servers: Vec<FamilyEndpoint>,

    /// Host to ask the servers about, forwarded verbatim as the `host`
    /// query parameter. Omitted from requests when empty.
    #[arg(long)]
    pub host: Option<String>,

    /// URL scheme used for lookup requests.
    #[arg(long, default_value = DEFAULT_SCHEME)]
    pub scheme: String,

    /// Google static maps API key. Map links are omitted when empty.
    #[arg(long, env = "MAPS_API_KEY", default_value = "", hide_env_values = true)]
    pub maps_api_key: String,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            servers: DEFAULT_SERVERS
                .iter()
                .filter_map(|spec| spec.parse().ok())
                .collect(),
            host: None,
            scheme: DEFAULT_SCHEME.to_string(),
            maps_api_key: String::new(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

impl Config {
    /// Validates the configuration, returning the first offending field.
    ///
    /// The target `host` is deliberately not validated; it is a pass-through
    /// query parameter and any string is accepted.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.servers.is_empty() {
            return Err(ValidationError {
                field: "servers",
                message: "at least one FAMILY=HOST server is required".to_string(),
            });
        }

        let mut families = HashSet::new();
        for endpoint in &self.servers {
            if !families.insert(endpoint.family.as_str()) {
                return Err(ValidationError {
                    field: "servers",
                    message: format!("duplicate family '{}'", endpoint.family),
                });
            }
        }

        if self.scheme != "http" && self.scheme != "https" {
            return Err(ValidationError {
                field: "scheme",
                message: format!("must be 'http' or 'https', got '{}'", self.scheme),
            });
        }

        for endpoint in &self.servers {
            let candidate = format!("{}://{}/json", self.scheme, endpoint.base_url);
            if Url::parse(&candidate).is_err() {
                return Err(ValidationError {
                    field: "servers",
                    message: format!(
                        "'{}' does not form a valid URL ({candidate})",
                        endpoint.base_url
                    ),
                });
            }
        }

        if self.timeout_seconds == 0 {
            return Err(ValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
