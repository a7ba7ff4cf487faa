//! Exchange rates against the base currency.

use serde::{Deserialize, Serialize};

use super::Currency;
use crate::error::{CoreError, CoreResult};
use crate::numeric::{finite_or_zero, positive_or_one};

/// Exchange rates quoted as units of foreign currency per 1 CNY.
///
/// This is the quoting used by CNY-based rate feeds (e.g. a `conversion_rates`
/// table with `USD ≈ 0.14`). Two directions follow from it:
///
/// ```text
/// foreign -> CNY : amount / rate   (holding aggregation)
/// CNY -> foreign : amount * rate   (rebalancing amounts)
/// ```
///
/// Both conversions guard the rate: a zero, negative or non-finite rate is
/// replaced by 1 and a non-finite result by 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRates {
    /// USD per 1 CNY.
    pub usd: f64,
    /// HKD per 1 CNY.
    pub hkd: f64,
}

impl ExchangeRates {
    /// Creates a rate pair.
    #[must_use]
    pub fn new(usd: f64, hkd: f64) -> Self {
        Self { usd, hkd }
    }

    /// Creates a rate pair, rejecting rates that are not strictly positive.
    pub fn try_new(usd: f64, hkd: f64) -> CoreResult<Self> {
        if !(usd > 0.0 && usd.is_finite()) {
            return Err(CoreError::invalid_rate("USD", usd));
        }
        if !(hkd > 0.0 && hkd.is_finite()) {
            return Err(CoreError::invalid_rate("HKD", hkd));
        }
        Ok(Self { usd, hkd })
    }

    /// Returns the raw rate for a currency (1 for CNY).
    #[must_use]
    pub fn rate(&self, currency: Currency) -> f64 {
        match currency {
            Currency::CNY => 1.0,
            Currency::USD => self.usd,
            Currency::HKD => self.hkd,
        }
    }

    /// Converts a foreign-currency amount into CNY by dividing by the rate.
    #[must_use]
    pub fn to_cny(&self, amount: f64, currency: Currency) -> f64 {
        if currency.is_base() {
            return finite_or_zero(amount);
        }
        finite_or_zero(amount / positive_or_one(self.rate(currency)))
    }

    /// Converts a CNY amount into a foreign currency by multiplying by the rate.
    #[must_use]
    pub fn from_cny(&self, amount: f64, currency: Currency) -> f64 {
        finite_or_zero(amount * self.rate(currency))
    }
}

impl Default for ExchangeRates {
    fn default() -> Self {
        Self { usd: 1.0, hkd: 1.0 }
    }
}
