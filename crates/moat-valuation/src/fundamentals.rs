//! Security fundamentals as configured by the user.

use serde::{Deserialize, Serialize};

use crate::profile::FundamentalsProfile;

/// Raw fundamentals for one security.
///
/// Historical series are ordered oldest first; the last entry is the most
/// recent period. Derived figures (ROIC, cash conversion, forward growth) are
/// never stored here, see [`crate::profile::preprocess`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecurityFundamentals {
    /// Display name, unique within a securities table.
    pub name: String,

    /// Quote code used to look up the price (e.g. `SH600519`).
    pub code: String,

    /// Valuation haircut applied to every component (1.0 = no haircut).
    pub discount: f64,

    /// Operating cash flow per period.
    #[serde(default)]
    pub cash_history: Option<Vec<f64>>,

    /// Reported ROIC per period, in percent.
    #[serde(default)]
    pub roic_history: Option<Vec<f64>>,

    /// Net profit per period.
    #[serde(default)]
    pub profit_history: Option<Vec<f64>>,

    /// Historical average P/E multiple.
    #[serde(default)]
    pub historical_pe: Option<f64>,

    /// Forward earnings per share.
    #[serde(default)]
    pub forward_eps: Option<f64>,

    /// Analyst growth forecast for the next periods, in percent.
    #[serde(default)]
    pub growth_forecast: Option<Vec<f64>>,

    /// Dividend rate applied to the earnings stream.
    #[serde(default)]
    pub dividend_yield: Option<f64>,

    /// Buyback rate applied to the earnings stream.
    #[serde(default)]
    pub buyback_yield: Option<f64>,

    /// Multiplier on the dividend rate for holding-company structures.
    #[serde(default)]
    pub equity_discount: Option<f64>,

    /// Flat addend to the composite score.
    #[serde(default)]
    pub extra_value: Option<f64>,

    /// Quoted for display only, excluded from scoring.
    #[serde(default)]
    pub price_only: bool,

    /// Fixed price used instead of the fetched one.
    #[serde(default)]
    pub override_price: Option<f64>,
}

impl SecurityFundamentals {
    /// Creates fundamentals with only the mandatory fields set.
    #[must_use]
    pub fn new(name: impl Into<String>, code: impl Into<String>, discount: f64) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            discount,
            cash_history: None,
            roic_history: None,
            profit_history: None,
            historical_pe: None,
            forward_eps: None,
            growth_forecast: None,
            dividend_yield: None,
            buyback_yield: None,
            equity_discount: None,
            extra_value: None,
            price_only: false,
            override_price: None,
        }
    }

    /// Sets the reported history (profit, ROIC %, cash flow).
    #[must_use]
    pub fn with_history(mut self, profit: Vec<f64>, roic: Vec<f64>, cash: Vec<f64>) -> Self {
        self.profit_history = Some(profit);
        self.roic_history = Some(roic);
        self.cash_history = Some(cash);
        self
    }

    /// Sets only the ROIC history (index-style securities).
    #[must_use]
    pub fn with_roic_history(mut self, roic: Vec<f64>) -> Self {
        self.roic_history = Some(roic);
        self
    }

    /// Sets the historical average P/E.
    #[must_use]
    pub fn with_historical_pe(mut self, pe: f64) -> Self {
        self.historical_pe = Some(pe);
        self
    }

    /// Sets the forward EPS.
    #[must_use]
    pub fn with_forward_eps(mut self, eps: f64) -> Self {
        self.forward_eps = Some(eps);
        self
    }

    /// Sets the growth forecast (percent per period).
    #[must_use]
    pub fn with_growth_forecast(mut self, growth: Vec<f64>) -> Self {
        self.growth_forecast = Some(growth);
        self
    }

    /// Sets the payout rates.
    #[must_use]
    pub fn with_payout(mut self, dividend: f64, buyback: f64) -> Self {
        self.dividend_yield = Some(dividend);
        self.buyback_yield = Some(buyback);
        self
    }

    /// Sets the equity discount multiplier.
    #[must_use]
    pub fn with_equity_discount(mut self, multiplier: f64) -> Self {
        self.equity_discount = Some(multiplier);
        self
    }

    /// Sets the flat extra value.
    #[must_use]
    pub fn with_extra_value(mut self, extra: f64) -> Self {
        self.extra_value = Some(extra);
        self
    }

    /// Marks the security as price-only.
    #[must_use]
    pub fn price_only(mut self) -> Self {
        self.price_only = true;
        self
    }

    /// Sets a fixed override price.
    #[must_use]
    pub fn with_override_price(mut self, price: f64) -> Self {
        self.override_price = Some(price);
        self
    }

    /// Classifies the record by which history series it carries.
    #[must_use]
    pub fn profile(&self) -> FundamentalsProfile<'_> {
        FundamentalsProfile::of(self)
    }

    /// Near-term growth rate for a forecast period, in percent (0 if absent).
    #[must_use]
    pub fn forecast_rate(&self, period: usize) -> f64 {
        self.growth_forecast
            .as_deref()
            .and_then(|g| g.get(period))
            .copied()
            .filter(|g| g.is_finite())
            .unwrap_or(0.0)
    }
}

/// Returns the value, or `default` when it is absent, zero or NaN.
pub(crate) fn or_default(value: Option<f64>, default: f64) -> f64 {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let f = SecurityFundamentals::new("Tencent", "HK00700", 0.9)
            .with_forward_eps(22.5)
            .with_growth_forecast(vec![12.0, 10.0, 9.0])
            .with_payout(0.25, 0.05);

        assert_eq!(f.code, "HK00700");
        assert_eq!(f.forward_eps, Some(22.5));
        assert_eq!(f.dividend_yield, Some(0.25));
        assert!(!f.price_only);
    }

    #[test]
    fn test_forecast_rate() {
        let f = SecurityFundamentals::new("A", "A", 1.0).with_growth_forecast(vec![8.0, 6.0]);
        assert_eq!(f.forecast_rate(1), 6.0);
        assert_eq!(f.forecast_rate(2), 0.0);

        let none = SecurityFundamentals::new("B", "B", 1.0);
        assert_eq!(none.forecast_rate(1), 0.0);
    }

    #[test]
    fn test_or_default() {
        assert_eq!(or_default(None, 15.0), 15.0);
        assert_eq!(or_default(Some(0.0), 15.0), 15.0);
        assert_eq!(or_default(Some(f64::NAN), 1.0), 1.0);
        assert_eq!(or_default(Some(25.0), 15.0), 25.0);
    }

    #[test]
    fn test_serde_optional_fields() {
        let json = r#"{"name": "HS300", "code": "SH000300", "discount": 1.0,
                       "roic_history": [14.6, 15.1, 15.1, 12.7, 11.2]}"#;
        let f: SecurityFundamentals = serde_json::from_str(json).unwrap();
        assert_eq!(f.roic_history.as_ref().map(Vec::len), Some(5));
        assert!(f.profit_history.is_none());
        assert!(!f.price_only);
    }
}
