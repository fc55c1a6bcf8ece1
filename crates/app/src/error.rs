//! Application error types with process exit code mapping.

use domain::DomainError;
use thiserror::Error;

use crate::config::ConfigError;

/// Application-level error type that maps to process exit codes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Missing or malformed arguments, or a help/version request.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// A product argument is not `<product_id>=<amount>`.
    #[error("Invalid product '{arg}' (expected <product_id>=<amount>)")]
    InvalidProduct { arg: String },

    /// Domain logic error.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    /// Returns the process exit code for this error.
    ///
    /// Domain failures exit with 1, invalid input or configuration with 2.
    /// Help and version output exit with 0.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Domain(_) => 1,
            AppError::Cli(e) => u8::try_from(e.exit_code()).unwrap_or(2),
            AppError::Config(_) | AppError::InvalidProduct { .. } => 2,
        }
    }
}
