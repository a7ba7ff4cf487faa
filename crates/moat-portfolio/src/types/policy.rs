//! Portfolio policy: targets, debt, beneficiaries.
//!
//! The policy is an explicit immutable input to every pass. Nothing is read
//! from ambient state.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// Default loan-to-collateral ratio.
pub const DEFAULT_COLLATERAL_RATIO: f64 = 0.25;

/// Target allocation for one tag, in percentage points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRatio {
    /// Allocation bucket.
    pub tag: String,
    /// Target share of the leveraged total, in percent.
    pub ratio: f64,
}

impl TargetRatio {
    /// Creates a target.
    #[must_use]
    pub fn new(tag: impl Into<String>, ratio: f64) -> Self {
        Self {
            tag: tag.into(),
            ratio,
        }
    }
}

/// A named beneficiary owning a fixed fraction of the net asset value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeneficiaryConfig {
    /// Display name.
    pub name: String,
    /// Fraction of net asset value in `[0, 1]`.
    pub ratio: f64,
    /// Capital originally contributed, for growth reporting.
    #[serde(default)]
    pub initial_capital: Option<f64>,
}

impl BeneficiaryConfig {
    /// Creates a beneficiary.
    #[must_use]
    pub fn new(name: impl Into<String>, ratio: f64) -> Self {
        Self {
            name: name.into(),
            ratio,
            initial_capital: None,
        }
    }

    /// Sets the initial capital.
    #[must_use]
    pub fn with_initial_capital(mut self, capital: f64) -> Self {
        self.initial_capital = Some(capital);
        self
    }
}

/// Which beneficiary share a figure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareSlot {
    /// The first configured beneficiary.
    Primary,
    /// The second configured beneficiary.
    #[default]
    Secondary,
}

/// Year-start reference for the annualized yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldBaseline {
    /// Beneficiary the yield is measured on.
    #[serde(default)]
    pub beneficiary: ShareSlot,
    /// That beneficiary's value at the start of the year.
    pub year_start_value: f64,
}

impl YieldBaseline {
    /// Creates a baseline.
    #[must_use]
    pub fn new(beneficiary: ShareSlot, year_start_value: f64) -> Self {
        Self {
            beneficiary,
            year_start_value,
        }
    }
}

impl Default for YieldBaseline {
    fn default() -> Self {
        Self::new(ShareSlot::Secondary, 0.0)
    }
}

fn default_collateral_ratio() -> f64 {
    DEFAULT_COLLATERAL_RATIO
}

fn default_primary() -> BeneficiaryConfig {
    BeneficiaryConfig::new("primary", 0.0)
}

fn default_secondary() -> BeneficiaryConfig {
    BeneficiaryConfig::new("secondary", 0.0)
}

/// Static configuration of a portfolio pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPolicy {
    /// Targets in display order.
    #[serde(default)]
    pub targets: Vec<TargetRatio>,

    /// Outstanding debt in CNY.
    #[serde(default)]
    pub fixed_debt: f64,

    /// Maximum debt as a fraction of collateral value.
    #[serde(default = "default_collateral_ratio")]
    pub collateral_ratio: f64,

    /// First beneficiary.
    #[serde(default = "default_primary")]
    pub primary: BeneficiaryConfig,

    /// Second beneficiary.
    #[serde(default = "default_secondary")]
    pub secondary: BeneficiaryConfig,

    /// Reference for the annualized yield.
    #[serde(default)]
    pub yield_baseline: YieldBaseline,

    /// Tag split into its holdings in the distribution.
    #[serde(default)]
    pub mixed_tag: Option<String>,
}

impl Default for PortfolioPolicy {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            fixed_debt: 0.0,
            collateral_ratio: DEFAULT_COLLATERAL_RATIO,
            primary: default_primary(),
            secondary: default_secondary(),
            yield_baseline: YieldBaseline::default(),
            mixed_tag: None,
        }
    }
}

impl PortfolioPolicy {
    /// Creates an empty policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a target.
    #[must_use]
    pub fn with_target(mut self, tag: impl Into<String>, ratio: f64) -> Self {
        self.targets.push(TargetRatio::new(tag, ratio));
        self
    }

    /// Sets the fixed debt.
    #[must_use]
    pub fn with_fixed_debt(mut self, debt: f64) -> Self {
        self.fixed_debt = debt;
        self
    }

    /// Sets the loan-to-collateral ratio.
    #[must_use]
    pub fn with_collateral_ratio(mut self, ratio: f64) -> Self {
        self.collateral_ratio = ratio;
        self
    }

    /// Sets both beneficiaries.
    #[must_use]
    pub fn with_beneficiaries(mut self, primary: BeneficiaryConfig, secondary: BeneficiaryConfig) -> Self {
        self.primary = primary;
        self.secondary = secondary;
        self
    }

    /// Sets the yield baseline.
    #[must_use]
    pub fn with_yield_baseline(mut self, baseline: YieldBaseline) -> Self {
        self.yield_baseline = baseline;
        self
    }

    /// Sets the mixed tag.
    #[must_use]
    pub fn with_mixed_tag(mut self, tag: impl Into<String>) -> Self {
        self.mixed_tag = Some(tag.into());
        self
    }

    /// Target ratio for a tag, if configured.
    #[must_use]
    pub fn target_for(&self, tag: &str) -> Option<f64> {
        self.targets.iter().find(|t| t.tag == tag).map(|t| t.ratio)
    }

    /// Sum of all target ratios.
    #[must_use]
    pub fn target_sum(&self) -> f64 {
        self.targets.iter().map(|t| t.ratio).sum()
    }

    /// Beneficiary in a slot.
    #[must_use]
    pub fn beneficiary(&self, slot: ShareSlot) -> &BeneficiaryConfig {
        match slot {
            ShareSlot::Primary => &self.primary,
            ShareSlot::Secondary => &self.secondary,
        }
    }

    /// Validates the policy.
    ///
    /// Rejects negative or non-finite target ratios, duplicate target tags,
    /// negative debt, a collateral ratio outside `[0, 1]`, and beneficiary
    /// ratios outside `[0, 1]` or summing above 1.
    pub fn validate(&self) -> PortfolioResult<()> {
        let mut seen = HashSet::new();
        for target in &self.targets {
            if !(target.ratio >= 0.0 && target.ratio.is_finite()) {
                return Err(PortfolioError::invalid_ratio(&target.tag, target.ratio));
            }
            if !seen.insert(target.tag.as_str()) {
                return Err(PortfolioError::duplicate_target(&target.tag));
            }
        }

        if !(self.fixed_debt >= 0.0 && self.fixed_debt.is_finite()) {
            return Err(PortfolioError::invalid_policy(format!(
                "fixed debt must be non-negative, got {}",
                self.fixed_debt
            )));
        }

        if !(0.0..=1.0).contains(&self.collateral_ratio) {
            return Err(PortfolioError::invalid_ratio(
                "collateral_ratio",
                self.collateral_ratio,
            ));
        }

        for b in [&self.primary, &self.secondary] {
            if !(0.0..=1.0).contains(&b.ratio) {
                return Err(PortfolioError::invalid_ratio(&b.name, b.ratio));
            }
        }
        if self.primary.ratio + self.secondary.ratio > 1.0 + 1e-9 {
            return Err(PortfolioError::invalid_policy(format!(
                "beneficiary ratios sum to {} (> 1)",
                self.primary.ratio + self.secondary.ratio
            )));
        }

        Ok(())
    }
}
