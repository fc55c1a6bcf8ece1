//! Application configuration loaded from environment variables.

use domain::order::access::DEFAULT_PREMIUM_PRODUCTS;
use domain::{Client, ProductId};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Clients known to the in-memory client provider unless configured otherwise.
pub const DEFAULT_CLIENTS: &str = "john_doe";

/// Errors raised while reading the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A `CLIENTS` entry could not be parsed.
    #[error("Invalid client entry '{entry}': {reason}")]
    InvalidClient { entry: String, reason: &'static str },

    /// `RUST_LOG` is not a valid filter directive.
    #[error("Invalid log filter '{value}': {reason}")]
    InvalidLogLevel { value: String, reason: String },

    /// `LOG_FORMAT` is neither `text` nor `json`.
    #[error("Invalid log format '{0}' (expected 'text' or 'json')")]
    InvalidLogFormat(String),
}

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidLogFormat(s.to_string())),
        }
    }
}

/// Application configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `PREMIUM_PRODUCTS`: comma-separated premium product ids (default: `"premium_1,premium_2"`)
/// - `CLIENTS`: comma-separated known clients, `id` or `id:premium` (default: `"john_doe"`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub log_level: String,
    pub log_format: LogFormat,
    pub premium_products: Vec<ProductId>,
    pub clients: Vec<Client>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through the given variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        Ok(Self {
            log_level: match lookup("RUST_LOG") {
                Some(level) => validate_log_level(level)?,
                None => defaults.log_level,
            },
            log_format: lookup("LOG_FORMAT")
                .map(|f| f.parse::<LogFormat>())
                .transpose()?
                .unwrap_or(defaults.log_format),
            premium_products: lookup("PREMIUM_PRODUCTS")
                .map(|p| parse_product_list(&p))
                .unwrap_or(defaults.premium_products),
            clients: match lookup("CLIENTS") {
                Some(c) => parse_client_list(&c)?,
                None => defaults.clients,
            },
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            premium_products: DEFAULT_PREMIUM_PRODUCTS
                .into_iter()
                .map(ProductId::from)
                .collect(),
            clients: vec![Client::regular(DEFAULT_CLIENTS)],
        }
    }
}

/// Checks that the value parses as a tracing filter directive.
pub fn validate_log_level(value: String) -> Result<String, ConfigError> {
    match EnvFilter::try_new(&value) {
        Ok(_) => Ok(value),
        Err(e) => Err(ConfigError::InvalidLogLevel {
            reason: e.to_string(),
            value,
        }),
    }
}

/// Parses a comma-separated product id list, skipping blank entries.
pub fn parse_product_list(value: &str) -> Vec<ProductId> {
    value
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(ProductId::from)
        .collect()
}

/// Parses a comma-separated client list of `id` or `id:premium` entries.
pub fn parse_client_list(value: &str) -> Result<Vec<Client>, ConfigError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(parse_client)
        .collect()
}

fn parse_client(entry: &str) -> Result<Client, ConfigError> {
    let invalid = |reason| ConfigError::InvalidClient {
        entry: entry.to_string(),
        reason,
    };

    let (id, premium) = match entry.split_once(':') {
        None => (entry, false),
        Some((id, "premium")) => (id, true),
        Some((id, "regular")) => (id, false),
        Some(_) => return Err(invalid("tier must be 'premium' or 'regular'")),
    };

    let id = id.trim();
    if id.is_empty() {
        return Err(invalid("client id is empty"));
    }
    Ok(Client::new(id, premium))
}
