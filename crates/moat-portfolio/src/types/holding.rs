//! Holding representation.

use moat_core::numeric::finite_or_zero;
use moat_core::{Currency, ExchangeRates, PriceMap};
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, PortfolioResult};

/// One position or property in the portfolio.
///
/// A holding with a `code` is priced from the fetched price map. Without a
/// code, the quantity is already an amount in the holding's currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    /// Allocation bucket.
    pub tag: String,

    /// Units held, or the amount for unpriced holdings.
    pub quantity: f64,

    /// Quote code for priced holdings.
    #[serde(default)]
    pub code: Option<String>,

    /// Fixed unit price for illiquid or unquoted holdings.
    #[serde(default)]
    pub override_price: Option<f64>,

    /// Currency the value is denominated in.
    #[serde(default)]
    pub currency: Currency,

    /// Counts toward collateral value.
    #[serde(default)]
    pub collateral: bool,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

impl Holding {
    /// Creates an unpriced CNY holding.
    #[must_use]
    pub fn new(tag: impl Into<String>, quantity: f64) -> Self {
        Self {
            tag: tag.into(),
            quantity,
            code: None,
            override_price: None,
            currency: Currency::CNY,
            collateral: false,
            name: None,
        }
    }

    /// Sets the quote code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Sets a fixed unit price.
    #[must_use]
    pub fn with_override_price(mut self, price: f64) -> Self {
        self.override_price = Some(price);
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Marks the holding as collateral.
    #[must_use]
    pub fn as_collateral(mut self) -> Self {
        self.collateral = true;
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display label: name, else code, else tag.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or(&self.tag)
    }

    /// Returns true if the holding is priced from the price map.
    #[must_use]
    pub fn is_priced(&self) -> bool {
        self.code.is_some()
    }

    /// Unit price in the holding's currency.
    ///
    /// A non-zero override wins. Otherwise priced holdings use the fetched
    /// price (0 when missing) and unpriced holdings use 1.
    #[must_use]
    pub fn unit_price(&self, prices: &PriceMap) -> f64 {
        match self.override_price {
            Some(p) if p != 0.0 && p.is_finite() => p,
            _ => match &self.code {
                Some(code) => prices.price_or_zero(code),
                None => 1.0,
            },
        }
    }

    /// Value in the holding's own currency.
    #[must_use]
    pub fn local_value(&self, prices: &PriceMap) -> f64 {
        finite_or_zero(self.unit_price(prices) * self.quantity)
    }

    /// Value converted to CNY. Never NaN.
    #[must_use]
    pub fn value_cny(&self, prices: &PriceMap, rates: &ExchangeRates) -> f64 {
        finite_or_zero(rates.to_cny(self.local_value(prices), self.currency))
    }

    /// Checks the holding for values that cannot be aggregated meaningfully.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.tag.trim().is_empty() {
            return Err(PortfolioError::invalid_holding(self.label(), "tag is empty"));
        }
        if !self.quantity.is_finite() {
            return Err(PortfolioError::invalid_holding(
                self.label(),
                "quantity is not finite",
            ));
        }
        if let Some(p) = self.override_price {
            if p < 0.0 || !p.is_finite() {
                return Err(PortfolioError::invalid_holding(
                    self.label(),
                    format!("override price {p} is invalid"),
                ));
            }
        }
        Ok(())
    }
}
