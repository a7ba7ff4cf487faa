//! Ranked breakdown of holdings for display.

use moat_core::numeric::{divisor_or_one, finite_or_zero};
use serde::{Deserialize, Serialize};

use crate::aggregation::HoldingsAggregate;

/// One slice of the distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieItem {
    /// Tag, or holding label for the mixed tag.
    pub name: String,
    /// CNY amount.
    pub amount: f64,
    /// `100 × amount / grand total`.
    pub ratio: f64,
}

/// Builds the distribution from an aggregate.
///
/// Every tag becomes one item, except `mixed_tag` whose holdings are listed
/// individually. Non-positive amounts are dropped; items are ranked by amount.
#[must_use]
pub fn build_distribution(aggregate: &HoldingsAggregate, mixed_tag: Option<&str>) -> Vec<PieItem> {
    let total = divisor_or_one(aggregate.grand_total);
    let item = |name: &str, amount: f64| PieItem {
        name: name.to_string(),
        amount,
        ratio: finite_or_zero(100.0 * amount / total),
    };

    let tags = aggregate
        .tag_totals
        .iter()
        .filter(|(tag, _)| Some(tag.as_str()) != mixed_tag)
        .map(|(tag, amount)| item(tag, *amount));

    let mixed = aggregate
        .holdings
        .iter()
        .filter(|h| Some(h.tag.as_str()) == mixed_tag)
        .map(|h| item(&h.label, h.value));

    let mut items: Vec<PieItem> = tags.chain(mixed).filter(|i| i.amount > 0.0).collect();
    items.sort_by(|a, b| {
        b.amount
            .partial_cmp(&a.amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregation::HoldingValue;
    use approx::assert_relative_eq;

    fn holding(label: &str, tag: &str, value: f64) -> HoldingValue {
        HoldingValue {
            label: label.to_string(),
            tag: tag.to_string(),
            unit_price: 1.0,
            value,
            collateral: false,
        }
    }

    fn aggregate() -> HoldingsAggregate {
        let holdings = vec![
            holding("Equity", "Equity", 600.0),
            holding("Fund A", "Mixed", 150.0),
            holding("Fund B", "Mixed", 250.0),
            holding("Cash", "Cash", 0.0),
        ];
        HoldingsAggregate {
            tag_totals: [
                ("Equity".to_string(), 600.0),
                ("Mixed".to_string(), 400.0),
                ("Cash".to_string(), 0.0),
            ]
            .into_iter()
            .collect(),
            holdings,
            collateral_total: 0.0,
            grand_total: 1000.0,
        }
    }

    #[test]
    fn test_by_tag() {
        let items = build_distribution(&aggregate(), None);
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Equity", "Mixed"]);
        assert_relative_eq!(items[0].ratio, 60.0);
        assert_relative_eq!(items[1].ratio, 40.0);
    }

    #[test]
    fn test_mixed_tag_split() {
        let items = build_distribution(&aggregate(), Some("Mixed"));
        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Equity", "Fund B", "Fund A"]);
        assert_relative_eq!(items[2].ratio, 15.0);

        let total: f64 = items.iter().map(|i| i.ratio).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_empty() {
        assert!(build_distribution(&HoldingsAggregate::default(), None).is_empty());
    }
}
