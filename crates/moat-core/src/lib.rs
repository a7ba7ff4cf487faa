//! # Moat Core
//!
//! Core types and guarded numerics for the Moat valuation and allocation library.
//!
//! This crate provides the foundational building blocks used throughout Moat:
//!
//! - **Types**: [`Currency`], [`ExchangeRates`] and [`PriceMap`]
//! - **Numerics**: Divisor and NaN guards so no derived figure is ever NaN
//! - **Batches**: [`BatchConfig`] and [`parallel::map_batch`] for valuing a securities table
//!
//! ## Design Philosophy
//!
//! - **Degrade, never fail**: Malformed numeric inputs fall back to safe defaults
//!   (1 for a divisor, 0 for a result) instead of aborting an evaluation pass
//! - **Explicit Over Implicit**: Every figure is a function of explicit inputs
//!
//! ## Example
//!
//! ```rust
//! use moat_core::prelude::*;
//!
//! let rates = ExchangeRates::new(0.14, 1.09);
//! let cny = rates.to_cny(140.0, Currency::USD);
//! assert!((cny - 1000.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::doc_markdown)]

pub mod config;
pub mod error;
pub mod numeric;
pub mod parallel;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::BatchConfig;
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::numeric::{divisor_or_one, finite_or_zero, fixed2, positive_or_one};
    pub use crate::parallel::map_batch;
    pub use crate::types::{Currency, ExchangeRates, PriceMap};
}

// Re-export commonly used types at crate root
pub use config::BatchConfig;
pub use error::{CoreError, CoreResult};
pub use types::{Currency, ExchangeRates, PriceMap};
