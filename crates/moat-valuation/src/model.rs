//! Composite valuation model.
//!
//! A security's fair multiple ("normal P/E") is the mean of three capped
//! components:
//!
//! - **ROIC P/E**: `ROIC × cash conversion × discount`
//! - **History P/E**: `historical P/E × discount`
//! - **Growth P/E**: `discount × offset × (1 + Σ growth chain, periods 2..10)`
//!
//! The score at a test price combines two terms measured against the actual
//! forward P/E at that price:
//!
//! - **PEV**: `sensitivity × (normal P/E / actual P/E − 1)`
//! - **PBV**: present value of ten years of dividends and buybacks, per 100 of
//!   price, discounted at the hurdle rate
//!
//! Both terms fall as the price rises, so the score is non-increasing in price.

use moat_core::numeric::{divisor_or_one, finite_or_zero, fixed2, non_negative, positive_or_one};
use serde::{Deserialize, Serialize};

use crate::fundamentals::{or_default, SecurityFundamentals};
use crate::params::ValuationParams;
use crate::profile::{preprocess, DerivedMetrics};
use crate::result::{PricedScore, ValuationResult};

/// Number of periods in the growth and payout chains.
const HORIZON: usize = 10;

/// The three capped P/E components and their mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentPes {
    /// ROIC-derived component.
    pub roic_pe: f64,
    /// History-derived component.
    pub history_pe: f64,
    /// Growth-derived component.
    pub grow_pe: f64,
    /// Mean of the three components.
    pub normal_pe: f64,
}

/// Valuation model bound to one security.
///
/// Construction runs the preprocessor; every later call is a pure function
/// of the price.
#[derive(Debug, Clone)]
pub struct ValuationModel<'a> {
    fundamentals: &'a SecurityFundamentals,
    params: &'a ValuationParams,
    metrics: DerivedMetrics,
    components: ComponentPes,
}

impl<'a> ValuationModel<'a> {
    /// Creates a model for a security.
    #[must_use]
    pub fn new(fundamentals: &'a SecurityFundamentals, params: &'a ValuationParams) -> Self {
        let metrics = preprocess(fundamentals, params);
        let mut model = Self {
            fundamentals,
            params,
            metrics,
            components: ComponentPes {
                roic_pe: 0.0,
                history_pe: 0.0,
                grow_pe: 0.0,
                normal_pe: 0.0,
            },
        };
        model.components = model.compute_components();
        model
    }

    /// Derived metrics used by the model.
    #[must_use]
    pub fn metrics(&self) -> DerivedMetrics {
        self.metrics
    }

    /// Capped P/E components.
    #[must_use]
    pub fn component_pes(&self) -> ComponentPes {
        self.components
    }

    fn discount(&self) -> f64 {
        positive_or_one(self.fundamentals.discount)
    }

    fn forward_eps(&self) -> f64 {
        or_default(self.fundamentals.forward_eps, 1.0)
    }

    /// Growth factor for a forecast period, never negative.
    fn forecast_factor(&self, period: usize) -> f64 {
        non_negative(1.0 + self.fundamentals.forecast_rate(period) / 100.0)
    }

    fn long_run_factor(&self) -> f64 {
        non_negative(1.0 + self.metrics.growth)
    }

    /// Per-period growth factors for periods 2 through 10.
    fn growth_factors(&self) -> [f64; HORIZON - 1] {
        let mut factors = [self.long_run_factor(); HORIZON - 1];
        factors[0] = self.forecast_factor(1);
        factors[1] = self.forecast_factor(2);
        factors
    }

    fn compute_components(&self) -> ComponentPes {
        let p = self.params;
        let discount = self.discount();

        let roic_pe = p.cap(self.metrics.roic * self.metrics.cash_conversion * discount);

        let historical = or_default(self.fundamentals.historical_pe, p.default_historical_pe);
        let history_pe = p.cap(historical * discount);

        let mut level = 1.0;
        let mut chain = 0.0;
        for factor in self.growth_factors() {
            level *= factor;
            chain += level;
        }
        let grow_pe = p.cap(discount * p.growth_pe_offset * (1.0 + chain));

        ComponentPes {
            roic_pe,
            history_pe,
            grow_pe,
            normal_pe: (roic_pe + history_pe + grow_pe) / 3.0,
        }
    }

    /// Actual forward P/E at a price.
    #[must_use]
    pub fn actual_pe(&self, price: f64) -> f64 {
        finite_or_zero(non_negative(price) / divisor_or_one(self.forward_eps()))
    }

    /// PEV term at a test price.
    #[must_use]
    pub fn pev(&self, price: f64) -> f64 {
        let pe = positive_or_one(self.actual_pe(price));
        finite_or_zero(self.params.pev_sensitivity * (self.components.normal_pe / pe - 1.0))
    }

    /// PBV term at a test price.
    #[must_use]
    pub fn pbv(&self, price: f64) -> f64 {
        let f = self.fundamentals;
        let pe = positive_or_one(self.actual_pe(price));
        let hurdle = divisor_or_one(1.0 + self.params.hurdle_rate);

        let mut period = 100.0 / pe;
        let mut stream = period;
        for factor in self.growth_factors() {
            period = period * factor / hurdle;
            stream += period;
        }

        let dividend = non_negative(f.dividend_yield.unwrap_or(0.0));
        let buyback = non_negative(f.buyback_yield.unwrap_or(0.0));
        let equity = non_negative(or_default(f.equity_discount, 1.0));
        let payout = dividend * equity + buyback;

        finite_or_zero(self.discount() * payout * stream / 100.0)
    }

    /// Composite score at a test price: `PEV + PBV + extra value`.
    #[must_use]
    pub fn composite(&self, price: f64) -> f64 {
        let extra = finite_or_zero(self.fundamentals.extra_value.unwrap_or(0.0));
        finite_or_zero(self.pev(price) + self.pbv(price) + extra)
    }

    fn priced(&self, price: f64) -> PricedScore {
        let value = self.composite(price);
        PricedScore {
            price,
            value,
            score: fixed2(value),
        }
    }

    /// Scores the security at a price and at the bumped prices around it.
    #[must_use]
    pub fn evaluate(&self, price: f64) -> ValuationResult {
        let price = finite_or_zero(non_negative(price));
        let bump = self.params.price_bump;

        ValuationResult {
            name: self.fundamentals.name.clone(),
            code: self.fundamentals.code.clone(),
            price,
            base: self.priced(price),
            price_up: self.priced(price * (1.0 + bump)),
            price_down: self.priced(price * (1.0 - bump)),
            actual_pe: self.actual_pe(price),
            components: self.components,
            growth: self.metrics.growth,
            roic: self.metrics.roic,
            cash_conversion: self.metrics.cash_conversion,
            fundamentals: self.fundamentals.clone(),
        }
    }
}

/// Values one security at a price with the given parameters.
#[must_use]
pub fn value_security(
    fundamentals: &SecurityFundamentals,
    price: f64,
    params: &ValuationParams,
) -> ValuationResult {
    ValuationModel::new(fundamentals, params).evaluate(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ValuationParams {
        ValuationParams::default()
    }

    fn index() -> SecurityFundamentals {
        SecurityFundamentals::new("HS300", "SH000300", 1.0)
            .with_roic_history(vec![10.0, 10.0, 10.0, 10.0, 10.0])
            .with_historical_pe(12.0)
            .with_forward_eps(1.0)
    }

    #[test]
    fn test_components_without_growth() {
        let f = index();
        let p = params();
        let c = ValuationModel::new(&f, &p).component_pes();

        // 0.7 * 10 = 7
        assert_relative_eq!(c.roic_pe, 7.0, epsilon = 1e-12);
        assert_relative_eq!(c.history_pe, 12.0, epsilon = 1e-12);
        // 1.2 * (1 + 9)
        assert_relative_eq!(c.grow_pe, 12.0, epsilon = 1e-12);
        assert_relative_eq!(c.normal_pe, 31.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_components_with_growth() {
        let f = index().with_growth_forecast(vec![20.0, 10.0, 5.0]);
        let p = params();
        let c = ValuationModel::new(&f, &p).component_pes();

        // g = 0.7 * 35 / 300; chain = 1.10, 1.155, then *(1 + g) for 7 periods
        assert_relative_eq!(c.grow_pe, 17.351416383526992, epsilon = 1e-9);
    }

    #[test]
    fn test_history_default() {
        let mut f = index();
        f.historical_pe = None;
        let p = params();
        assert_relative_eq!(ValuationModel::new(&f, &p).component_pes().history_pe, 15.0);

        f.historical_pe = Some(0.0);
        assert_relative_eq!(ValuationModel::new(&f, &p).component_pes().history_pe, 15.0);
    }

    #[test]
    fn test_components_capped() {
        let f = SecurityFundamentals::new("Hot", "H", 5.0)
            .with_roic_history(vec![40.0; 5])
            .with_historical_pe(80.0)
            .with_growth_forecast(vec![60.0, 60.0, 60.0]);
        let p = params();
        let c = ValuationModel::new(&f, &p).component_pes();

        assert_eq!(c.roic_pe, 30.0);
        assert_eq!(c.history_pe, 30.0);
        assert_eq!(c.grow_pe, 30.0);
        assert_eq!(c.normal_pe, 30.0);
    }

    #[test]
    fn test_actual_pe_guards() {
        let mut f = index();
        let p = params();
        assert_relative_eq!(ValuationModel::new(&f, &p).actual_pe(25.0), 25.0);

        f.forward_eps = Some(0.0);
        assert_relative_eq!(ValuationModel::new(&f, &p).actual_pe(25.0), 25.0);

        f.forward_eps = Some(2.5);
        assert_relative_eq!(ValuationModel::new(&f, &p).actual_pe(25.0), 10.0);
    }

    #[test]
    fn test_pev() {
        let f = index();
        let p = params();
        let m = ValuationModel::new(&f, &p);

        // normal P/E 31/3, actual 10
        assert_relative_eq!(m.pev(10.0), 70.0 * (31.0 / 30.0 - 1.0), epsilon = 1e-9);
        // price 0 guards the actual P/E to 1
        assert_relative_eq!(m.pev(0.0), 70.0 * (31.0 / 3.0 - 1.0), epsilon = 1e-9);
    }

    #[test]
    fn test_pbv_zero_without_payout() {
        let f = index();
        let p = params();
        assert_eq!(ValuationModel::new(&f, &p).pbv(10.0), 0.0);
    }

    #[test]
    fn test_pbv_stream() {
        let f = index().with_payout(0.5, 0.1);
        let p = params();
        let m = ValuationModel::new(&f, &p);

        // seed 10, then 9 periods discounted at 1/1.1
        let stream: f64 = (0..10).map(|k| 10.0 / 1.1_f64.powi(k)).sum();
        assert_relative_eq!(m.pbv(10.0), 0.6 * stream / 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equity_discount_scales_dividend_only() {
        let p = params();
        let plain = index().with_payout(0.5, 0.1);
        let holding_co = plain.clone().with_equity_discount(0.6);

        let a = ValuationModel::new(&plain, &p).pbv(10.0);
        let b = ValuationModel::new(&holding_co, &p).pbv(10.0);
        // payout 0.6 vs 0.5 * 0.6 + 0.1 = 0.4
        assert_relative_eq!(b / a, 0.4 / 0.6, epsilon = 1e-9);
    }

    #[test]
    fn test_extra_value_is_additive() {
        let p = params();
        let base = index();
        let extra = base.clone().with_extra_value(12.5);
        let a = ValuationModel::new(&base, &p).composite(8.0);
        let b = ValuationModel::new(&extra, &p).composite(8.0);
        assert_relative_eq!(b - a, 12.5, epsilon = 1e-9);
    }

    #[test]
    fn test_evaluate_formats_scores() {
        let f = index();
        let p = params();
        let r = value_security(&f, 10.0, &p);

        assert_eq!(r.base.score, "2.33");
        assert_relative_eq!(r.price_up.price, 10.5);
        assert_relative_eq!(r.price_down.price, 9.5);
        assert!(r.price_up.value <= r.base.value);
        assert!(r.base.value <= r.price_down.value);
    }

    #[test]
    fn test_negative_eps_is_flat() {
        let f = index().with_forward_eps(-2.0);
        let p = params();
        let r = value_security(&f, 10.0, &p);
        assert_eq!(r.base.score, r.price_up.score);
        assert_eq!(r.base.score, r.price_down.score);
    }

    #[test]
    fn test_negative_price_sanitized() {
        let f = index();
        let p = params();
        let r = value_security(&f, -5.0, &p);
        assert_eq!(r.price, 0.0);
        assert_eq!(r.actual_pe, 0.0);
    }
}
