//! Model constants.

use serde::{Deserialize, Serialize};

/// Constants of the valuation model.
///
/// The defaults are the calibrated values; overriding them is meant for
/// sensitivity studies, not for per-security tuning (use the fundamentals'
/// discount factor for that).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationParams {
    /// Ceiling for each P/E component.
    pub component_cap: f64,

    /// Score points per unit of relative P/E gap.
    pub pev_sensitivity: f64,

    /// Multiplier on the growth-chain P/E.
    pub growth_pe_offset: f64,

    /// Per-period discount rate of the payout stream.
    pub hurdle_rate: f64,

    /// Cap on post-haircut long-run growth.
    pub long_run_growth_cap: f64,

    /// Share of the forecast growth that is trusted.
    pub growth_haircut: f64,

    /// Share of the average ROIC kept for index-style securities.
    pub index_roic_haircut: f64,

    /// Relative bump for the sensitivity scores.
    pub price_bump: f64,

    /// Historical P/E used when none is configured.
    pub default_historical_pe: f64,
}

impl Default for ValuationParams {
    fn default() -> Self {
        Self {
            component_cap: 30.0,
            pev_sensitivity: 70.0,
            growth_pe_offset: 1.2,
            hurdle_rate: 0.10,
            long_run_growth_cap: 0.10,
            growth_haircut: 0.7,
            index_roic_haircut: 0.7,
            price_bump: 0.05,
            default_historical_pe: 15.0,
        }
    }
}

impl ValuationParams {
    /// Creates the default parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hurdle rate.
    #[must_use]
    pub fn with_hurdle_rate(mut self, rate: f64) -> Self {
        self.hurdle_rate = rate;
        self
    }

    /// Sets the component cap.
    #[must_use]
    pub fn with_component_cap(mut self, cap: f64) -> Self {
        self.component_cap = cap;
        self
    }

    /// Clamps a component into `[0, component_cap]`.
    #[must_use]
    pub fn cap(&self, component: f64) -> f64 {
        if component.is_nan() {
            return 0.0;
        }
        component.clamp(0.0, self.component_cap)
    }
}
