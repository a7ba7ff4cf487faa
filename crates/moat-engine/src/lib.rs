//! # Moat Engine
//!
//! One evaluation pass of the Moat dashboard:
//!
//! ```text
//! DashboardConfig ─► quote codes ─► fetch prices ┐
//!                                   fetch rates  ┴─► evaluate ─► DashboardReport
//! ```
//!
//! Prices and rates are fetched concurrently; the rate fetch is retried per
//! [`RetryPolicy`]. A pass either starts with complete market data or fails
//! with [`EngineError::MarketData`].
//!
//! ## Usage
//!
//! ```ignore
//! let engine = DashboardEngineBuilder::new()
//!     .with_config(DashboardConfig::from_file("moat.toml")?)
//!     .with_prices(Arc::new(CsvPriceSource::new("prices.csv")?))
//!     .with_rates(Arc::new(JsonExchangeRateSource::new("rates.json")))
//!     .build()?;
//!
//! let report = engine.run().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod pass;
pub mod report;

pub use builder::DashboardEngineBuilder;
pub use config::DashboardConfig;
pub use engine::DashboardEngine;
pub use error::{EngineError, EngineResult};
pub use fetch::{fetch_market_data, fetch_rates, RetryPolicy};
pub use pass::evaluate;
pub use report::{DashboardReport, WatchQuote};
