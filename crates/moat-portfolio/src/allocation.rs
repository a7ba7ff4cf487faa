//! Target-vs-actual allocation analysis.
//!
//! Ratios are measured against the leveraged total. Rebalancing amounts are
//! reported in CNY and mirrored into USD and HKD by multiplying by the
//! foreign-per-CNY rate, the opposite direction of the aggregation step.

use moat_core::numeric::{divisor_or_one, finite_or_zero};
use moat_core::{Currency, ExchangeRates};
use serde::{Deserialize, Serialize};

use crate::aggregation::HoldingsAggregate;
use crate::types::TargetRatio;

/// Relative deviation above which a tag is watched.
pub const WATCH_THRESHOLD: f64 = 10.0;

/// Relative deviation above which a tag is flagged.
pub const ALERT_THRESHOLD: f64 = 15.0;

/// Severity of a tag's relative deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviationLevel {
    /// |relative deviation| ≤ 10.
    Normal,
    /// 10 < |relative deviation| ≤ 15.
    Watch,
    /// |relative deviation| > 15.
    Alert,
}

impl DeviationLevel {
    /// Classifies a relative deviation in percent.
    #[must_use]
    pub fn from_relative(relative_deviation: f64) -> Self {
        let magnitude = relative_deviation.abs();
        if magnitude > ALERT_THRESHOLD {
            Self::Alert
        } else if magnitude > WATCH_THRESHOLD {
            Self::Watch
        } else {
            Self::Normal
        }
    }
}

/// Suggested trade for a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RebalanceAction {
    /// Over target, sell down.
    Trim,
    /// Under target, buy.
    Add,
    /// On target.
    Hold,
}

impl RebalanceAction {
    /// Action for a CNY deviation amount.
    #[must_use]
    pub fn from_amount(deviation_cny: f64) -> Self {
        if deviation_cny > 0.0 {
            Self::Trim
        } else if deviation_cny < 0.0 {
            Self::Add
        } else {
            Self::Hold
        }
    }
}

impl std::fmt::Display for RebalanceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Trim => "trim",
            Self::Add => "add",
            Self::Hold => "hold",
        })
    }
}

impl std::fmt::Display for DeviationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Watch => "watch",
            Self::Alert => "alert",
        })
    }
}

/// Allocation of one target tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagAllocation {
    /// Allocation bucket.
    pub tag: String,
    /// Target, in percent of the leveraged total.
    pub target_ratio: f64,
    /// Current CNY total.
    pub current_total: f64,
    /// Actual share of the leveraged total, in percent.
    pub actual_ratio: f64,
    /// `actual − target`, in percentage points.
    pub deviation: f64,
    /// Deviation as a percentage of the target.
    pub relative_deviation: f64,
    /// Target amount in CNY.
    pub target_amount: f64,
    /// `current − target amount` in CNY.
    pub deviation_cny: f64,
    /// Deviation amount in USD.
    pub deviation_usd: f64,
    /// Deviation amount in HKD.
    pub deviation_hkd: f64,
    /// Severity.
    pub level: DeviationLevel,
    /// Suggested trade.
    pub action: RebalanceAction,
}

impl TagAllocation {
    /// Computes the allocation of one tag.
    #[must_use]
    pub fn compute(
        target: &TargetRatio,
        current_total: f64,
        leveraged_total: f64,
        rates: &ExchangeRates,
    ) -> Self {
        let current_total = finite_or_zero(current_total);
        let actual_ratio = finite_or_zero(100.0 * current_total / divisor_or_one(leveraged_total));
        let deviation = actual_ratio - target.ratio;
        let relative_deviation = relative_deviation(deviation, target.ratio, actual_ratio);

        let target_amount = finite_or_zero(leveraged_total * target.ratio / 100.0);
        let deviation_cny = current_total - target_amount;

        Self {
            tag: target.tag.clone(),
            target_ratio: target.ratio,
            current_total,
            actual_ratio,
            deviation,
            relative_deviation,
            target_amount,
            deviation_cny,
            deviation_usd: rates.from_cny(deviation_cny, Currency::USD),
            deviation_hkd: rates.from_cny(deviation_cny, Currency::HKD),
            level: DeviationLevel::from_relative(relative_deviation),
            action: RebalanceAction::from_amount(deviation_cny),
        }
    }
}

/// Relative deviation in percent of target.
///
/// An unfunded target (ratio 0) reads 100 when something is held and 0 when
/// nothing is.
#[must_use]
pub fn relative_deviation(deviation: f64, target_ratio: f64, actual_ratio: f64) -> f64 {
    if target_ratio > 0.0 {
        finite_or_zero(deviation / target_ratio * 100.0)
    } else if actual_ratio > 0.0 {
        100.0
    } else {
        0.0
    }
}

/// Compares each configured target with the aggregated totals.
///
/// Tags held without a target are left out. The result is sorted by actual
/// ratio, highest first; ties keep target order.
#[must_use]
pub fn analyze_allocations(
    targets: &[TargetRatio],
    aggregate: &HoldingsAggregate,
    leveraged_total: f64,
    rates: &ExchangeRates,
) -> Vec<TagAllocation> {
    let mut allocations: Vec<TagAllocation> = targets
        .iter()
        .map(|t| TagAllocation::compute(t, aggregate.tag_total(&t.tag), leveraged_total, rates))
        .collect();

    allocations.sort_by(|a, b| {
        b.actual_ratio
            .partial_cmp(&a.actual_ratio)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    allocations
}

/// Tags held in the aggregate that have no configured target.
#[must_use]
pub fn untargeted_tags<'a>(targets: &[TargetRatio], aggregate: &'a HoldingsAggregate) -> Vec<&'a str> {
    aggregate
        .tag_totals
        .keys()
        .filter(|tag| !targets.iter().any(|t| &t.tag == *tag))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn aggregate(totals: &[(&str, f64)]) -> HoldingsAggregate {
        HoldingsAggregate {
            tag_totals: totals.iter().map(|(t, v)| ((*t).to_string(), *v)).collect(),
            grand_total: totals.iter().map(|(_, v)| v).sum(),
            ..HoldingsAggregate::default()
        }
    }

    #[test]
    fn test_deviation_example() {
        let target = TargetRatio::new("Bonds", 20.0);
        let a = TagAllocation::compute(&target, 150_000.0, 1_000_000.0, &ExchangeRates::default());

        assert_relative_eq!(a.actual_ratio, 15.0, epsilon = 1e-12);
        assert_relative_eq!(a.deviation, -5.0, epsilon = 1e-12);
        assert_relative_eq!(a.relative_deviation, -25.0, epsilon = 1e-12);
        assert_relative_eq!(a.target_amount, 200_000.0);
        assert_relative_eq!(a.deviation_cny, -50_000.0);
        assert_eq!(a.level, DeviationLevel::Alert);
        assert_eq!(a.action, RebalanceAction::Add);
    }

    #[test]
    fn test_foreign_amounts_multiply() {
        let rates = ExchangeRates::new(0.14, 1.09);
        let target = TargetRatio::new("Equity", 50.0);
        let a = TagAllocation::compute(&target, 600_000.0, 1_000_000.0, &rates);

        assert_relative_eq!(a.deviation_cny, 100_000.0);
        assert_relative_eq!(a.deviation_usd, 14_000.0, epsilon = 1e-6);
        assert_relative_eq!(a.deviation_hkd, 109_000.0, epsilon = 1e-6);
        assert_eq!(a.action, RebalanceAction::Trim);
    }

    #[test]
    fn test_unfunded_target() {
        let target = TargetRatio::new("Crypto", 0.0);
        let held = TagAllocation::compute(&target, 10_000.0, 1_000_000.0, &ExchangeRates::default());
        assert_eq!(held.relative_deviation, 100.0);

        let empty = TagAllocation::compute(&target, 0.0, 1_000_000.0, &ExchangeRates::default());
        assert_eq!(empty.relative_deviation, 0.0);
        assert_eq!(empty.level, DeviationLevel::Normal);
        assert_eq!(empty.action, RebalanceAction::Hold);
    }

    #[test]
    fn test_zero_leveraged_total_guarded() {
        let target = TargetRatio::new("Cash", 10.0);
        let a = TagAllocation::compute(&target, 500.0, 0.0, &ExchangeRates::default());
        assert_relative_eq!(a.actual_ratio, 50_000.0);
        assert!(a.relative_deviation.is_finite());
    }

    #[test]
    fn test_levels() {
        assert_eq!(DeviationLevel::from_relative(10.0), DeviationLevel::Normal);
        assert_eq!(DeviationLevel::from_relative(-12.0), DeviationLevel::Watch);
        assert_eq!(DeviationLevel::from_relative(15.0), DeviationLevel::Watch);
        assert_eq!(DeviationLevel::from_relative(15.01), DeviationLevel::Alert);
    }

    #[test]
    fn test_analyze_sorted_and_untargeted_excluded() {
        let agg = aggregate(&[("Equity", 500_000.0), ("Bonds", 300_000.0), ("Art", 200_000.0)]);
        let targets = vec![
            TargetRatio::new("Bonds", 30.0),
            TargetRatio::new("Gold", 10.0),
            TargetRatio::new("Equity", 60.0),
        ];

        let allocations = analyze_allocations(&targets, &agg, 1_000_000.0, &ExchangeRates::default());
        let tags: Vec<&str> = allocations.iter().map(|a| a.tag.as_str()).collect();
        assert_eq!(tags, vec!["Equity", "Bonds", "Gold"]);
        assert_eq!(allocations[2].current_total, 0.0);

        assert_eq!(untargeted_tags(&targets, &agg), vec!["Art"]);
    }

    #[test]
    fn test_display() {
        let actions: Vec<String> = [RebalanceAction::Trim, RebalanceAction::Add, RebalanceAction::Hold]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(actions, ["trim", "add", "hold"]);

        let levels: Vec<String> = [DeviationLevel::Normal, DeviationLevel::Watch, DeviationLevel::Alert]
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(levels, ["normal", "watch", "alert"]);
    }
}
