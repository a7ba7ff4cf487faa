//! Currency type for the three settlement currencies a portfolio is held in.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Currencies a holding can be denominated in.
///
/// `CNY` is the base currency every figure is reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chinese Yuan Renminbi (base)
    #[default]
    CNY,
    /// United States Dollar
    USD,
    /// Hong Kong Dollar
    HKD,
}

impl Currency {
    /// All supported currencies, base first.
    pub const ALL: [Currency; 3] = [Currency::CNY, Currency::USD, Currency::HKD];

    /// Returns the ISO 4217 3-letter code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Currency::CNY => "CNY",
            Currency::USD => "USD",
            Currency::HKD => "HKD",
        }
    }

    /// Returns the currency symbol.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::CNY => "¥",
            Currency::USD => "$",
            Currency::HKD => "HK$",
        }
    }

    /// Returns the full currency name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Currency::CNY => "Chinese Yuan Renminbi",
            Currency::USD => "United States Dollar",
            Currency::HKD => "Hong Kong Dollar",
        }
    }

    /// Returns true for the reporting currency.
    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(self, Currency::CNY)
    }

    /// Parses a currency from an ISO code or a market alias.
    ///
    /// Market aliases follow exchange listings: `us` (USD), `hk` (HKD) and
    /// `hs` (Shanghai/Shenzhen, CNY).
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "CNY" | "RMB" | "HS" => Some(Currency::CNY),
            "USD" | "US" => Some(Currency::USD),
            "HKD" | "HK" => Some(Currency::HKD),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Currency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::from_code(s).ok_or_else(|| CoreError::unknown_currency(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code() {
        assert_eq!(Currency::CNY.code(), "CNY");
        assert_eq!(Currency::USD.code(), "USD");
        assert_eq!(Currency::HKD.code(), "HKD");
    }

    #[test]
    fn test_currency_symbol() {
        assert_eq!(Currency::CNY.symbol(), "¥");
        assert_eq!(Currency::HKD.symbol(), "HK$");
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("hk"), Some(Currency::HKD));
        assert_eq!(Currency::from_code("hs"), Some(Currency::CNY));
        assert_eq!(Currency::from_code("EUR"), None);
        assert_eq!(Currency::from_code(""), None);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("HKD".parse::<Currency>(), Ok(Currency::HKD));
        assert!("JPY".parse::<Currency>().is_err());
    }

    #[test]
    fn test_default_is_base() {
        assert_eq!(Currency::default(), Currency::CNY);
        assert!(Currency::default().is_base());
        assert!(!Currency::USD.is_base());
    }

    #[test]
    fn test_serde() {
        let json = serde_json::to_string(&Currency::HKD).unwrap();
        assert_eq!(json, "\"HKD\"");
        let parsed: Currency = serde_json::from_str("\"USD\"").unwrap();
        assert_eq!(parsed, Currency::USD);
    }
}
