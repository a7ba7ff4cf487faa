//! # Moat Valuation
//!
//! Fundamentals preprocessing and the composite valuation model.
//!
//! ## Overview
//!
//! A [`SecurityFundamentals`] record is classified into a
//! [`FundamentalsProfile`], preprocessed into [`DerivedMetrics`] (ROIC, cash
//! conversion, long-run growth) and scored by a [`ValuationModel`] at the
//! evaluated price and at the price bumped 5% either way.
//!
//! ```rust
//! use moat_valuation::prelude::*;
//!
//! let index = SecurityFundamentals::new("HS300", "SH000300", 1.0)
//!     .with_roic_history(vec![10.0, 11.0, 12.0, 11.0, 10.0])
//!     .with_historical_pe(12.0)
//!     .with_forward_eps(0.3);
//!
//! let params = ValuationParams::default();
//! let result = value_security(&index, 3.9, &params);
//! assert!(result.price_up.value <= result.base.value);
//! assert!(result.base.value <= result.price_down.value);
//! ```
//!
//! Nothing in this crate fails: degenerate inputs fall back to guarded
//! defaults and every output figure is finite.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]

pub mod batch;
pub mod fundamentals;
pub mod model;
pub mod params;
pub mod profile;
pub mod result;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{price_for, value_securities};
    pub use crate::fundamentals::SecurityFundamentals;
    pub use crate::model::{value_security, ComponentPes, ValuationModel};
    pub use crate::params::ValuationParams;
    pub use crate::profile::{preprocess, DerivedMetrics, FundamentalsProfile};
    pub use crate::result::{PricedScore, ValuationResult};
}

pub use batch::{price_for, value_securities};
pub use fundamentals::SecurityFundamentals;
pub use model::{value_security, ComponentPes, ValuationModel};
pub use params::ValuationParams;
pub use profile::{preprocess, DerivedMetrics, FundamentalsProfile};
pub use result::{PricedScore, ValuationResult};
