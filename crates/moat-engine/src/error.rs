//! Engine error types.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Engine error type.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// Market data could not be fetched
    #[error("market data error: {0}")]
    MarketData(String),

    /// Configuration file could not be read
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(reason: impl Into<String>) -> Self {
        Self::ConfigError(reason.into())
    }

    /// Create a market data error.
    #[must_use]
    pub fn market_data(reason: impl Into<String>) -> Self {
        Self::MarketData(reason.into())
    }
}

impl From<moat_traits::TraitError> for EngineError {
    fn from(e: moat_traits::TraitError) -> Self {
        EngineError::MarketData(e.to_string())
    }
}

impl From<moat_portfolio::PortfolioError> for EngineError {
    fn from(e: moat_portfolio::PortfolioError) -> Self {
        EngineError::ConfigError(e.to_string())
    }
}

impl From<moat_core::CoreError> for EngineError {
    fn from(e: moat_core::CoreError) -> Self {
        EngineError::ConfigError(e.to_string())
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(e: toml::de::Error) -> Self {
        EngineError::ConfigError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moat_portfolio::PortfolioError;
    use moat_traits::TraitError;

    #[test]
    fn test_conversions() {
        let e: EngineError = TraitError::Timeout.into();
        assert!(matches!(e, EngineError::MarketData(_)));

        let e: EngineError = PortfolioError::duplicate_target("cash").into();
        assert!(e.to_string().contains("cash"));
        assert!(matches!(e, EngineError::ConfigError(_)));
    }
}
