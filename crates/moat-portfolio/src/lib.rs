//! # Moat Portfolio
//!
//! Holdings aggregation and allocation analytics.
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: Every figure is a function of holdings, prices, rates
//!   and an explicit [`PortfolioPolicy`]
//! - **Never NaN**: Missing prices, zero rates and empty totals degrade to
//!   guarded defaults instead of failing the pass
//!
//! ## Pipeline
//!
//! ```text
//! holdings + prices + rates ─► aggregate_holdings ─► HoldingsAggregate
//!                                                     ├─► derive_global_state ─► GlobalState
//!                                                     ├─► analyze_allocations ─► Vec<TagAllocation>
//!                                                     └─► build_distribution  ─► Vec<PieItem>
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use moat_core::{ExchangeRates, PriceMap};
//! use moat_portfolio::prelude::*;
//!
//! let holdings = vec![
//!     Holding::new("A", 100.0).with_code("SH600519"),
//!     Holding::new("B", 1.0).with_override_price(500.0),
//! ];
//! let prices = PriceMap::new().with_price("SH600519", 10.0);
//! let policy = PortfolioPolicy::new().with_target("A", 50.0).with_target("B", 50.0);
//!
//! let analysis = analyze_portfolio(&holdings, &prices, &ExchangeRates::default(), &policy);
//! assert_eq!(analysis.global.grand_total, 1500.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod aggregation;
pub mod allocation;
pub mod distribution;
pub mod error;
pub mod types;

use moat_core::{ExchangeRates, PriceMap};
use serde::{Deserialize, Serialize};

use crate::aggregation::{aggregate_holdings, derive_global_state, GlobalState, HoldingsAggregate};
use crate::allocation::{analyze_allocations, TagAllocation};
use crate::distribution::{build_distribution, PieItem};
use crate::types::{Holding, PortfolioPolicy};

/// Everything the portfolio side of a pass produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAnalysis {
    /// Per-tag and per-holding values.
    pub aggregate: HoldingsAggregate,
    /// Portfolio-wide figures.
    pub global: GlobalState,
    /// Target tags, highest actual ratio first.
    pub allocations: Vec<TagAllocation>,
    /// Display breakdown, largest amount first.
    pub distribution: Vec<PieItem>,
}

/// Runs aggregation, global-state derivation, allocation analysis and the
/// distribution builder in order.
#[must_use]
pub fn analyze_portfolio(
    holdings: &[Holding],
    prices: &PriceMap,
    rates: &ExchangeRates,
    policy: &PortfolioPolicy,
) -> PortfolioAnalysis {
    let aggregate = aggregate_holdings(holdings, prices, rates);
    let global = derive_global_state(&aggregate, policy, rates);
    let allocations = analyze_allocations(&policy.targets, &aggregate, global.leveraged_total, rates);
    let distribution = build_distribution(&aggregate, policy.mixed_tag.as_deref());

    PortfolioAnalysis {
        aggregate,
        global,
        allocations,
        distribution,
    }
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::aggregation::{
        aggregate_holdings, derive_global_state, BeneficiaryShare, GlobalState, HoldingValue,
        HoldingsAggregate,
    };
    pub use crate::allocation::{
        analyze_allocations, untargeted_tags, DeviationLevel, RebalanceAction, TagAllocation,
    };
    pub use crate::distribution::{build_distribution, PieItem};
    pub use crate::error::{PortfolioError, PortfolioResult};
    pub use crate::types::{
        BeneficiaryConfig, Holding, PortfolioPolicy, ShareSlot, TargetRatio, YieldBaseline,
    };
    pub use crate::{analyze_portfolio, PortfolioAnalysis};
}

pub use error::{PortfolioError, PortfolioResult};
