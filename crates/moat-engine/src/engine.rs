//! The dashboard engine.

use moat_traits::market_data::MarketDataProvider;
use tracing::info;

use crate::config::DashboardConfig;
use crate::error::EngineResult;
use crate::fetch::{fetch_market_data, RetryPolicy};
use crate::pass::evaluate;
use crate::report::DashboardReport;

/// Runs evaluation passes against injected market data sources.
#[derive(Debug)]
pub struct DashboardEngine {
    config: DashboardConfig,
    market_data: MarketDataProvider,
    retry: RetryPolicy,
}

impl DashboardEngine {
    /// Create an engine. Prefer [`crate::DashboardEngineBuilder`], which
    /// validates the configuration.
    pub fn new(config: DashboardConfig, market_data: MarketDataProvider, retry: RetryPolicy) -> Self {
        Self {
            config,
            market_data,
            retry,
        }
    }

    /// The configuration passes run with.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Fetches market data and evaluates the dashboard.
    ///
    /// Nothing is evaluated unless both prices and rates arrive.
    pub async fn run(&self) -> EngineResult<DashboardReport> {
        let codes = self.config.quote_codes();
        info!(
            holdings = self.config.holdings.len(),
            securities = self.config.securities.len(),
            codes = codes.len(),
            "starting evaluation pass"
        );

        let (prices, rates) = fetch_market_data(&self.market_data, &codes, &self.retry).await?;
        let report = evaluate(&self.config, &prices, &rates);

        info!(
            grand_total = report.global.grand_total,
            valuations = report.valuations.len(),
            "evaluation pass complete"
        );
        Ok(report)
    }
}
