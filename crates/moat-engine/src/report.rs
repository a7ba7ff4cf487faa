//! Output of an evaluation pass.

use chrono::{DateTime, Utc};
use moat_core::ExchangeRates;
use moat_portfolio::aggregation::GlobalState;
use moat_portfolio::allocation::TagAllocation;
use moat_portfolio::distribution::PieItem;
use moat_valuation::ValuationResult;
use serde::{Deserialize, Serialize};

/// Quote for a security tracked without a valuation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchQuote {
    /// Display name.
    pub name: String,
    /// Quote code.
    pub code: String,
    /// Price used for the pass.
    pub price: f64,
}

/// Dashboard produced by one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// When the pass ran.
    pub generated_at: DateTime<Utc>,
    /// Rates the pass ran with.
    pub rates: ExchangeRates,
    /// Portfolio-wide figures.
    pub global: GlobalState,
    /// Scored securities, best base score first.
    pub valuations: Vec<ValuationResult>,
    /// Target tags, highest actual ratio first.
    pub allocations: Vec<TagAllocation>,
    /// Display breakdown, largest amount first.
    pub distribution: Vec<PieItem>,
    /// Price-only securities in table order.
    pub watchlist: Vec<WatchQuote>,
}

impl DashboardReport {
    /// Finds a valuation by security name.
    #[must_use]
    pub fn valuation(&self, name: &str) -> Option<&ValuationResult> {
        self.valuations.iter().find(|v| v.name == name)
    }

    /// Finds an allocation by tag.
    #[must_use]
    pub fn allocation(&self, tag: &str) -> Option<&TagAllocation> {
        self.allocations.iter().find(|a| a.tag == tag)
    }
}
