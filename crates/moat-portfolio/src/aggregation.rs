//! Holdings aggregation and global state.
//!
//! ## Formulas
//!
//! ```text
//! grand total      = Σ tag totals
//! net asset value  = grand total − fixed debt
//! max debt         = collateral × collateral ratio
//! available debt   = max(0, max debt − fixed debt)
//! leveraged total  = net asset value + max debt
//! debt ratio       = floor(100 × (collateral + debt) / debt), 0 without debt
//! annual yield     = 100 × (share − year start) / year start
//! ```

use std::collections::BTreeMap;

use moat_core::numeric::{finite_or_zero, fixed2};
use moat_core::{ExchangeRates, PriceMap};
use serde::{Deserialize, Serialize};

use crate::types::{BeneficiaryConfig, Holding, PortfolioPolicy, ShareSlot};

/// Valuation of one holding within a pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingValue {
    /// Display label.
    pub label: String,
    /// Allocation bucket.
    pub tag: String,
    /// Resolved unit price in the holding's currency.
    pub unit_price: f64,
    /// Value in CNY.
    pub value: f64,
    /// Counts toward collateral.
    pub collateral: bool,
}

/// Per-tag totals and collateral for one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HoldingsAggregate {
    /// CNY total per tag.
    pub tag_totals: BTreeMap<String, f64>,
    /// Per-holding values, in input order.
    pub holdings: Vec<HoldingValue>,
    /// CNY value of collateral-eligible holdings.
    pub collateral_total: f64,
    /// Sum of all tag totals.
    pub grand_total: f64,
}

impl HoldingsAggregate {
    /// Total for a tag (0 when nothing is held under it).
    #[must_use]
    pub fn tag_total(&self, tag: &str) -> f64 {
        self.tag_totals.get(tag).copied().unwrap_or(0.0)
    }

    /// Number of distinct tags held.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tag_totals.len()
    }

    fn add(&mut self, holding: &Holding, prices: &PriceMap, rates: &ExchangeRates) {
        let value = holding.value_cny(prices, rates);

        *self.tag_totals.entry(holding.tag.clone()).or_insert(0.0) += value;
        if holding.collateral {
            self.collateral_total += value;
        }
        self.holdings.push(HoldingValue {
            label: holding.label().to_string(),
            tag: holding.tag.clone(),
            unit_price: holding.unit_price(prices),
            value,
            collateral: holding.collateral,
        });
    }
}

/// Sums holdings into per-tag totals and a collateral total.
///
/// Foreign holdings are converted to CNY by dividing by the rate. A holding
/// whose value cannot be computed contributes 0.
#[must_use]
pub fn aggregate_holdings(
    holdings: &[Holding],
    prices: &PriceMap,
    rates: &ExchangeRates,
) -> HoldingsAggregate {
    let mut aggregate = HoldingsAggregate::default();
    for holding in holdings {
        aggregate.add(holding, prices, rates);
    }
    aggregate.grand_total = aggregate.tag_totals.values().sum();
    aggregate
}

/// A beneficiary's share of the net asset value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryShare {
    /// Display name.
    pub name: String,
    /// Configured fraction.
    pub ratio: f64,
    /// Current value in CNY.
    pub value: f64,
    /// Value minus initial capital, when configured.
    pub growth: Option<f64>,
    /// Growth as a percentage of initial capital.
    pub growth_pct: Option<f64>,
}

impl BeneficiaryShare {
    fn of(config: &BeneficiaryConfig, net_asset_value: f64) -> Self {
        let value = finite_or_zero(net_asset_value * config.ratio);
        let growth = config.initial_capital.map(|c| finite_or_zero(value - c));
        let growth_pct = config
            .initial_capital
            .map(|c| finite_or_zero(100.0 * (value - c) / c));
        Self {
            name: config.name.clone(),
            ratio: config.ratio,
            value,
            growth,
            growth_pct,
        }
    }
}

/// Portfolio-wide figures for one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalState {
    /// Rates the pass ran with.
    pub rates: ExchangeRates,
    /// Sum of all holdings in CNY.
    pub grand_total: f64,
    /// Grand total minus fixed debt.
    pub clean_net_asset_value: f64,
    /// Collateral-eligible value.
    pub collateral_value: f64,
    /// Net asset value plus maximum allowed debt.
    pub leveraged_total: f64,
    /// Outstanding debt.
    pub fixed_debt: f64,
    /// Debt allowed by the collateral ratio.
    pub max_debt: f64,
    /// `floor(100 × (collateral + debt) / debt)`, 0 without debt.
    pub debt_ratio: f64,
    /// Additional debt capacity, never negative.
    pub available_debt: f64,
    /// Annualized yield of the baseline beneficiary, two decimals.
    pub annual_yield: String,
    /// First beneficiary.
    pub primary_share: BeneficiaryShare,
    /// Second beneficiary.
    pub secondary_share: BeneficiaryShare,
    /// Net asset value not assigned to either beneficiary.
    pub remainder_share: f64,
}

impl GlobalState {
    /// Share in a slot.
    #[must_use]
    pub fn share(&self, slot: ShareSlot) -> &BeneficiaryShare {
        match slot {
            ShareSlot::Primary => &self.primary_share,
            ShareSlot::Secondary => &self.secondary_share,
        }
    }
}

/// Derives the global state from an aggregate and the policy.
#[must_use]
pub fn derive_global_state(
    aggregate: &HoldingsAggregate,
    policy: &PortfolioPolicy,
    rates: &ExchangeRates,
) -> GlobalState {
    let debt = finite_or_zero(policy.fixed_debt);
    let collateral = aggregate.collateral_total;

    let clean = finite_or_zero(aggregate.grand_total - debt);
    let max_debt = finite_or_zero(collateral * policy.collateral_ratio);
    let available_debt = (max_debt - debt).max(0.0);
    let leveraged_total = clean + max_debt;

    let debt_ratio = if debt == 0.0 {
        0.0
    } else {
        finite_or_zero((100.0 * (collateral + debt) / debt).floor())
    };

    let primary_share = BeneficiaryShare::of(&policy.primary, clean);
    let secondary_share = BeneficiaryShare::of(&policy.secondary, clean);
    let remainder_share = clean - primary_share.value - secondary_share.value;

    let baseline = &policy.yield_baseline;
    let measured = match baseline.beneficiary {
        ShareSlot::Primary => primary_share.value,
        ShareSlot::Secondary => secondary_share.value,
    };
    let annual_yield = fixed2(100.0 * (measured - baseline.year_start_value) / baseline.year_start_value);

    GlobalState {
        rates: *rates,
        grand_total: aggregate.grand_total,
        clean_net_asset_value: clean,
        collateral_value: collateral,
        leveraged_total,
        fixed_debt: debt,
        max_debt,
        debt_ratio,
        available_debt,
        annual_yield,
        primary_share,
        secondary_share,
        remainder_share,
    }
}
