//! # Moat Traits
//!
//! Trait definitions for the data sources an evaluation pass consumes.
//!
//! This crate contains ONLY trait definitions with no runtime dependencies.
//! Implementations live in extension crates such as `moat-ext-file`.
//!
//! ## Dependency Injection
//!
//! The dashboard engine uses these traits via dependency injection:
//!
//! ```ignore
//! DashboardEngineBuilder::new()
//!     .with_config(config)
//!     .with_prices(impl PriceSource)
//!     .with_rates(impl ExchangeRateSource)
//!     .build()
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod market_data;

// Re-export commonly used types
pub use error::TraitError;
pub use market_data::{ExchangeRateSource, MarketDataProvider, PriceSource, SourceType};
