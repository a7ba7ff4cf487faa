//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Security name not in the configuration.
    #[error("Unknown security: {0}. Run `moat config` to list securities.")]
    UnknownSecurity(String),

    /// Invalid price.
    #[error("Invalid price: {0}. Must be zero or positive.")]
    InvalidPrice(f64),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
