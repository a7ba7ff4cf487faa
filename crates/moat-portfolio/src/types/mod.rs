//! Core types for portfolio aggregation.
//!
//! - [`Holding`]: A position or property with its pricing rule
//! - [`PortfolioPolicy`]: Targets, debt and beneficiary configuration

mod holding;
mod policy;

pub use holding::Holding;
pub use policy::{
    BeneficiaryConfig, PortfolioPolicy, ShareSlot, TargetRatio, YieldBaseline,
    DEFAULT_COLLATERAL_RATIO,
};
