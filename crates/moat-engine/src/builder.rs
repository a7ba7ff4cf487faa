//! Builder pattern for the dashboard engine.

use std::sync::Arc;

use moat_traits::market_data::{ExchangeRateSource, MarketDataProvider, PriceSource};

use crate::config::DashboardConfig;
use crate::engine::DashboardEngine;
use crate::error::EngineError;
use crate::fetch::RetryPolicy;

/// Builder for constructing a [`DashboardEngine`].
pub struct DashboardEngineBuilder {
    config: Option<DashboardConfig>,
    prices: Option<Arc<dyn PriceSource>>,
    rates: Option<Arc<dyn ExchangeRateSource>>,
    retry: RetryPolicy,
}

impl DashboardEngineBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            prices: None,
            rates: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Set the dashboard configuration.
    pub fn with_config(mut self, config: DashboardConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the price source.
    pub fn with_prices(mut self, source: Arc<dyn PriceSource>) -> Self {
        self.prices = Some(source);
        self
    }

    /// Set the exchange rate source.
    pub fn with_rates(mut self, source: Arc<dyn ExchangeRateSource>) -> Self {
        self.rates = Some(source);
        self
    }

    /// Set both sources from a provider.
    pub fn with_market_data(self, provider: MarketDataProvider) -> Self {
        self.with_prices(provider.prices).with_rates(provider.rates)
    }

    /// Set the rate retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Build the engine, validating the configuration.
    pub fn build(self) -> Result<DashboardEngine, EngineError> {
        let config = self
            .config
            .ok_or_else(|| EngineError::config("config not set"))?;
        config.validate()?;

        let prices = self
            .prices
            .ok_or_else(|| EngineError::config("price source not configured"))?;

        let rates = self
            .rates
            .ok_or_else(|| EngineError::config("rate source not configured"))?;

        Ok(DashboardEngine::new(
            config,
            MarketDataProvider::new(prices, rates),
            self.retry,
        ))
    }
}

impl Default for DashboardEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}
