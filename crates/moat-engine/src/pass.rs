//! The evaluation pass.

use chrono::Utc;
use moat_core::{ExchangeRates, PriceMap};
use moat_portfolio::allocation::untargeted_tags;
use moat_portfolio::analyze_portfolio;
use moat_valuation::{price_for, value_securities};
use tracing::{debug, warn};

use crate::config::DashboardConfig;
use crate::report::{DashboardReport, WatchQuote};

/// Runs valuation and portfolio analysis over fetched market data.
///
/// Pure apart from the report timestamp: the same inputs give the same
/// figures.
#[must_use]
pub fn evaluate(config: &DashboardConfig, prices: &PriceMap, rates: &ExchangeRates) -> DashboardReport {
    for holding in &config.holdings {
        if let Some(code) = &holding.code {
            if holding.override_price.is_none() && !prices.contains(code) {
                warn!(code = %code, tag = %holding.tag, "no price for holding, valued at 0");
            }
        }
    }

    let valuations = value_securities(
        &config.securities,
        prices,
        &config.valuation,
        &config.batch,
    );
    debug!(count = valuations.len(), "securities valued");

    let watchlist = config
        .securities
        .iter()
        .filter(|s| s.price_only)
        .map(|s| WatchQuote {
            name: s.name.clone(),
            code: s.code.clone(),
            price: price_for(s, prices),
        })
        .collect();

    let analysis = analyze_portfolio(&config.holdings, prices, rates, &config.policy);
    debug!(
        tags = analysis.aggregate.tag_count(),
        allocations = analysis.allocations.len(),
        "portfolio analyzed"
    );

    let untargeted = untargeted_tags(&config.policy.targets, &analysis.aggregate);
    if !untargeted.is_empty() {
        debug!(tags = ?untargeted, "held tags without a target");
    }

    DashboardReport {
        generated_at: Utc::now(),
        rates: *rates,
        global: analysis.global,
        valuations,
        allocations: analysis.allocations,
        distribution: analysis.distribution,
        watchlist,
    }
}
