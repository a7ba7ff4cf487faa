//! Fundamentals preprocessing.
//!
//! A record is classified by which history series it carries, and each
//! profile has its own ROIC policy:
//!
//! | Profile       | ROIC                                          | Cash conversion   |
//! |---------------|-----------------------------------------------|-------------------|
//! | `Reported`    | mean(latest ROIC, implied 5-period ROIC)      | Σcash / Σprofit   |
//! | `IndexStyle`  | haircut × mean(ROIC history)                  | 1                 |
//! | `Unreported`  | 0                                             | 1                 |
//!
//! The implied ROIC divides total profit by the sum of each period's equity
//! base `profit[i] / (roic[i] / 100)`, so a business whose latest ROIC is
//! still catching up is not judged on that single figure.

use moat_core::numeric::{divisor_or_one, finite_or_zero, mean, positive_or_one};
use serde::{Deserialize, Serialize};

use crate::fundamentals::SecurityFundamentals;
use crate::params::ValuationParams;

/// Shape of a fundamentals record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FundamentalsProfile<'a> {
    /// Profit, ROIC and cash history are all present.
    Reported {
        /// Net profit per period.
        profit: &'a [f64],
        /// ROIC per period, in percent.
        roic: &'a [f64],
        /// Operating cash flow per period.
        cash: &'a [f64],
    },
    /// Only a ROIC history is present (broad index).
    IndexStyle {
        /// ROIC per period, in percent.
        roic: &'a [f64],
    },
    /// No usable ROIC history.
    Unreported,
}

impl<'a> FundamentalsProfile<'a> {
    /// Classifies a record. Empty series count as absent.
    #[must_use]
    pub fn of(fundamentals: &'a SecurityFundamentals) -> Self {
        let present = |s: &'a Option<Vec<f64>>| s.as_deref().filter(|v| !v.is_empty());

        match (
            present(&fundamentals.profit_history),
            present(&fundamentals.roic_history),
            present(&fundamentals.cash_history),
        ) {
            (Some(profit), Some(roic), Some(cash)) => Self::Reported { profit, roic, cash },
            (_, Some(roic), _) => Self::IndexStyle { roic },
            _ => Self::Unreported,
        }
    }

    /// ROIC in percent.
    #[must_use]
    pub fn roic(&self, params: &ValuationParams) -> f64 {
        match self {
            Self::Reported { profit, roic, .. } => blended_roic(profit, roic),
            Self::IndexStyle { roic } => finite_or_zero(params.index_roic_haircut * mean(roic)),
            Self::Unreported => 0.0,
        }
    }

    /// Cumulative cash over cumulative profit.
    ///
    /// A ratio that comes out zero or non-finite is treated as 1.
    #[must_use]
    pub fn cash_conversion(&self) -> f64 {
        match self {
            Self::Reported { profit, cash, .. } => {
                let total_profit: f64 = profit.iter().sum();
                let total_cash: f64 = cash.iter().sum();
                divisor_or_one(total_cash / total_profit)
            }
            Self::IndexStyle { .. } | Self::Unreported => 1.0,
        }
    }

    /// Short label for reports.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Reported { .. } => "reported",
            Self::IndexStyle { .. } => "index",
            Self::Unreported => "unreported",
        }
    }
}

fn blended_roic(profit: &[f64], roic: &[f64]) -> f64 {
    let latest = roic.last().copied().map_or(0.0, finite_or_zero);

    // A zero-ROIC period makes the equity base infinite and the implied
    // ROIC 0; only the final ratio is guarded.
    let (total_profit, equity_base) = profit
        .iter()
        .zip(roic)
        .fold((0.0, 0.0), |(p_sum, e_sum), (&p, &r)| (p_sum + p, e_sum + p / (r / 100.0)));

    let implied = finite_or_zero(100.0 * total_profit / equity_base);
    (latest + implied) / 2.0
}

/// Figures derived from a fundamentals record.
///
/// Recomputed on every evaluation; nothing here is cached on the record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// ROIC in percent.
    pub roic: f64,
    /// Cash-conversion ratio.
    pub cash_conversion: f64,
    /// Long-run growth rate as a fraction.
    pub growth: f64,
}

/// Derives ROIC, cash conversion and long-run growth from a record.
#[must_use]
pub fn preprocess(fundamentals: &SecurityFundamentals, params: &ValuationParams) -> DerivedMetrics {
    let profile = fundamentals.profile();
    DerivedMetrics {
        roic: profile.roic(params),
        cash_conversion: profile.cash_conversion(),
        growth: long_run_growth(fundamentals, params),
    }
}

/// Long-run growth: `discount × min(haircut × Σforecast / 300, cap)`.
///
/// The forecast is treated as three periods of percentage growth. Without a
/// forecast the growth is 0.
#[must_use]
pub fn long_run_growth(fundamentals: &SecurityFundamentals, params: &ValuationParams) -> f64 {
    let Some(forecast) = fundamentals.growth_forecast.as_deref() else {
        return 0.0;
    };
    let total: f64 = forecast.iter().copied().map(finite_or_zero).sum();
    let trusted = (params.growth_haircut * total / 300.0).min(params.long_run_growth_cap);
    finite_or_zero(positive_or_one(fundamentals.discount) * trusted)
}
