//! CLI command implementations.

pub mod config;
pub mod evaluate;
pub mod value;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use evaluate::EvaluateArgs;
pub use value::ValueArgs;

use std::path::Path;

use anyhow::{Context, Result};
use moat_engine::DashboardConfig;

use crate::error::{CliError, CliResult};

/// Loads and validates a dashboard configuration.
pub fn load_config(path: &Path) -> Result<DashboardConfig> {
    let config = DashboardConfig::from_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

/// Validates a price value.
pub fn validate_price(price: f64) -> CliResult<f64> {
    if !(price >= 0.0 && price.is_finite()) {
        return Err(CliError::InvalidPrice(price));
    }
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_price() {
        assert_eq!(validate_price(0.0).unwrap(), 0.0);
        assert!(validate_price(-1.0).is_err());
        assert!(validate_price(f64::NAN).is_err());
    }
}
