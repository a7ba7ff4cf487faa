//! Error types for the Moat core crate.
//!
//! The numeric layer never errors; these variants cover parsing and
//! validation of the values handed to it.

use thiserror::Error;

/// A specialized Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// Unknown or unsupported currency code.
    #[error("Unknown currency: {code}")]
    UnknownCurrency {
        /// The code that failed to parse.
        code: String,
    },

    /// Exchange rate that is zero, negative or not finite.
    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate {
        /// Currency code the rate belongs to.
        currency: String,
        /// The rejected rate.
        rate: f64,
    },

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    ConfigError {
        /// Description of the configuration error.
        reason: String,
    },
}

impl CoreError {
    /// Creates an unknown currency error.
    #[must_use]
    pub fn unknown_currency(code: impl Into<String>) -> Self {
        Self::UnknownCurrency { code: code.into() }
    }

    /// Creates an invalid rate error.
    #[must_use]
    pub fn invalid_rate(currency: impl Into<String>, rate: f64) -> Self {
        Self::InvalidRate {
            currency: currency.into(),
            rate,
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::unknown_currency("EUR");
        assert!(err.to_string().contains("EUR"));

        let err = CoreError::invalid_rate("USD", 0.0);
        assert!(err.to_string().contains("USD"));
    }

    #[test]
    fn test_error_clone() {
        let err = CoreError::config("bad ratio");
        assert_eq!(err.clone(), err);
    }
}
