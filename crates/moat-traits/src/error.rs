//! Error types for source operations.

use thiserror::Error;

/// Common error type for market data sources.
#[derive(Debug, Error)]
pub enum TraitError {
    /// Connection to external service failed
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Requested resource not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Source not available
    #[error("source not available: {0}")]
    SourceNotAvailable(String),

    /// Operation timed out
    #[error("timeout")]
    Timeout,

    /// Parse/deserialization error
    #[error("parse error: {0}")]
    ParseError(String),

    /// IO error
    #[error("IO error: {0}")]
    IoError(String),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl TraitError {
    /// Returns true if retrying the same request may succeed.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::SourceNotAvailable(_) | Self::Timeout | Self::IoError(_)
        )
    }
}

impl From<std::io::Error> for TraitError {
    fn from(e: std::io::Error) -> Self {
        TraitError::IoError(e.to_string())
    }
}

impl From<moat_core::CoreError> for TraitError {
    fn from(e: moat_core::CoreError) -> Self {
        TraitError::InvalidInput(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient() {
        assert!(TraitError::Timeout.is_transient());
        assert!(TraitError::IoError("reset".into()).is_transient());
        assert!(!TraitError::ParseError("bad json".into()).is_transient());
    }

    #[test]
    fn test_from_io() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "rates.json");
        let err: TraitError = io.into();
        assert!(err.to_string().contains("rates.json"));
    }
}
