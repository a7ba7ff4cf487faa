//! Dashboard configuration.
//!
//! A dashboard is described by one TOML document:
//!
//! ```toml
//! [policy]
//! fixed_debt = 200000.0
//! mixed_tag = "mixed"
//!
//! [[policy.targets]]
//! tag = "equity"
//! ratio = 60.0
//!
//! [[holdings]]
//! tag = "equity"
//! code = "SH600519"
//! quantity = 100.0
//! collateral = true
//!
//! [[securities]]
//! name = "Moutai"
//! code = "SH600519"
//! discount = 1.0
//! forward_eps = 70.0
//! ```

use std::collections::HashSet;
use std::path::Path;

use moat_core::BatchConfig;
use moat_portfolio::types::{Holding, PortfolioPolicy};
use moat_valuation::{SecurityFundamentals, ValuationParams};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{EngineError, EngineResult};

/// Tolerance when checking that target ratios add up to 100.
const TARGET_SUM_TOLERANCE: f64 = 1e-6;

/// Everything an evaluation pass needs apart from market data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Targets, debt and beneficiaries.
    #[serde(default)]
    pub policy: PortfolioPolicy,

    /// Holdings in display order.
    #[serde(default)]
    pub holdings: Vec<Holding>,

    /// Securities table.
    #[serde(default)]
    pub securities: Vec<SecurityFundamentals>,

    /// Valuation model constants.
    #[serde(default)]
    pub valuation: ValuationParams,

    /// Batch valuation settings.
    #[serde(default)]
    pub batch: BatchConfig,
}

impl DashboardConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(content: &str) -> EngineResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Validates the policy, every holding and every security.
    ///
    /// A target list that does not add up to 100 is allowed but logged.
    pub fn validate(&self) -> EngineResult<()> {
        self.policy.validate()?;

        for holding in &self.holdings {
            holding.validate()?;
        }

        let mut names = HashSet::new();
        for security in &self.securities {
            if !(security.discount > 0.0 && security.discount.is_finite()) {
                return Err(EngineError::config(format!(
                    "security '{}': discount must be positive, got {}",
                    security.name, security.discount
                )));
            }
            if !names.insert(security.name.as_str()) {
                return Err(EngineError::config(format!(
                    "duplicate security name: {}",
                    security.name
                )));
            }
        }

        let sum = self.policy.target_sum();
        if !self.policy.targets.is_empty() && (sum - 100.0).abs() > TARGET_SUM_TOLERANCE {
            warn!(target_sum = sum, "target ratios do not sum to 100");
        }

        Ok(())
    }

    /// Every code to request from the price source, deduplicated and sorted.
    ///
    /// Price-only securities are requested too; they are not valued but the
    /// watchlist shows their quotes.
    #[must_use]
    pub fn quote_codes(&self) -> Vec<String> {
        let mut codes: Vec<String> = self
            .holdings
            .iter()
            .filter_map(|h| h.code.clone())
            .chain(self.securities.iter().map(|s| s.code.clone()))
            .filter(|c| !c.trim().is_empty())
            .collect();
        codes.sort();
        codes.dedup();
        codes
    }

    /// Finds a security by display name.
    #[must_use]
    pub fn security(&self, name: &str) -> Option<&SecurityFundamentals> {
        self.securities.iter().find(|s| s.name == name)
    }
}
