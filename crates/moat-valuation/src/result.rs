//! Valuation output types.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::fundamentals::SecurityFundamentals;
use crate::model::ComponentPes;

/// A composite score at one test price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedScore {
    /// Test price.
    pub price: f64,
    /// Unrounded score, used for ranking.
    pub value: f64,
    /// Score formatted to two decimals.
    pub score: String,
}

/// Valuation of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Display name.
    pub name: String,
    /// Quote code.
    pub code: String,
    /// Evaluated price.
    pub price: f64,
    /// Score at the evaluated price.
    pub base: PricedScore,
    /// Score at the price bumped up.
    pub price_up: PricedScore,
    /// Score at the price bumped down.
    pub price_down: PricedScore,
    /// Forward P/E at the evaluated price.
    pub actual_pe: f64,
    /// Capped components and the normal P/E.
    pub components: ComponentPes,
    /// Long-run growth rate.
    pub growth: f64,
    /// ROIC in percent.
    pub roic: f64,
    /// Cash-conversion ratio.
    pub cash_conversion: f64,
    /// Input record.
    pub fundamentals: SecurityFundamentals,
}

impl ValuationResult {
    /// Fair multiple.
    #[must_use]
    pub fn normal_pe(&self) -> f64 {
        self.components.normal_pe
    }

    /// Orders results by base score, highest first.
    #[must_use]
    pub fn by_score_desc(a: &Self, b: &Self) -> Ordering {
        b.base.value.total_cmp(&a.base.value)
    }
}
