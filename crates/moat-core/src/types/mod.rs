//! Domain types shared by the valuation and portfolio crates.
//!
//! - [`Currency`]: Settlement currencies (CNY base, USD, HKD)
//! - [`ExchangeRates`]: Foreign-per-CNY rate pair with guarded conversions
//! - [`PriceMap`]: Fetched prices keyed by security code

mod currency;
mod fx;
mod price_map;

pub use currency::Currency;
pub use fx::ExchangeRates;
pub use price_map::PriceMap;
