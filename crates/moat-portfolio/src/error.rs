//! Error types for portfolio configuration.
//!
//! Aggregation itself never fails; these errors come from validating a
//! policy or a holdings list before a pass.

use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur while validating portfolio inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Invalid policy configuration.
    #[error("Invalid policy: {reason}")]
    InvalidPolicy {
        /// The reason the policy is invalid.
        reason: String,
    },

    /// A target tag appears more than once.
    #[error("Duplicate target tag: {tag}")]
    DuplicateTarget {
        /// The repeated tag.
        tag: String,
    },

    /// A ratio outside its allowed range.
    #[error("Invalid ratio for '{name}': {value}")]
    InvalidRatio {
        /// What the ratio belongs to.
        name: String,
        /// The rejected value.
        value: f64,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding label.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },
}

impl PortfolioError {
    /// Create an invalid policy error.
    #[must_use]
    pub fn invalid_policy(reason: impl Into<String>) -> Self {
        Self::InvalidPolicy {
            reason: reason.into(),
        }
    }

    /// Create a duplicate target error.
    #[must_use]
    pub fn duplicate_target(tag: impl Into<String>) -> Self {
        Self::DuplicateTarget { tag: tag.into() }
    }

    /// Create an invalid ratio error.
    #[must_use]
    pub fn invalid_ratio(name: impl Into<String>, value: f64) -> Self {
        Self::InvalidRatio {
            name: name.into(),
            value,
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }
}
