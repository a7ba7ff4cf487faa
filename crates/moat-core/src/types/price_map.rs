//! Fetched prices keyed by security identifier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Prices keyed by security code, as handed over by a price feed.
///
/// Lookups never fail: a missing, negative or non-finite entry resolves to 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceMap {
    prices: HashMap<String, f64>,
}

impl PriceMap {
    /// Creates an empty price map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a price.
    pub fn insert(&mut self, code: impl Into<String>, price: f64) {
        self.prices.insert(code.into(), price);
    }

    /// Sets a price, builder style.
    #[must_use]
    pub fn with_price(mut self, code: impl Into<String>, price: f64) -> Self {
        self.insert(code, price);
        self
    }

    /// Returns the raw entry for a code, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.prices.get(code).copied()
    }

    /// Returns the price for a code, or 0 when it is missing or unusable.
    #[must_use]
    pub fn price_or_zero(&self, code: &str) -> f64 {
        match self.prices.get(code) {
            Some(&p) if p > 0.0 && p.is_finite() => p,
            _ => 0.0,
        }
    }

    /// Returns true if the map holds an entry for `code`.
    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.prices.contains_key(code)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if the map is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Iterates over `(code, price)` entries.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Merges another map into this one; entries in `other` win.
    pub fn extend(&mut self, other: PriceMap) {
        self.prices.extend(other.prices);
    }
}

impl FromIterator<(String, f64)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_resolves_to_zero() {
        let map = PriceMap::new().with_price("SH600519", 1500.0);
        assert_eq!(map.price_or_zero("SH600519"), 1500.0);
        assert_eq!(map.price_or_zero("HK00700"), 0.0);
    }

    #[test]
    fn test_unusable_prices_resolve_to_zero() {
        let map = PriceMap::new()
            .with_price("NEG", -3.0)
            .with_price("NAN", f64::NAN);
        assert_eq!(map.price_or_zero("NEG"), 0.0);
        assert_eq!(map.price_or_zero("NAN"), 0.0);
        assert!(map.contains("NAN"));
    }

    #[test]
    fn test_extend_overrides() {
        let mut a = PriceMap::new().with_price("X", 1.0);
        a.extend(PriceMap::new().with_price("X", 2.0).with_price("Y", 3.0));
        assert_eq!(a.len(), 2);
        assert_eq!(a.get("X"), Some(2.0));
    }

    #[test]
    fn test_serde_transparent() {
        let map: PriceMap = serde_json::from_str(r#"{"SZ000858": 130.5}"#).unwrap();
        assert_eq!(map.price_or_zero("SZ000858"), 130.5);
    }
}
