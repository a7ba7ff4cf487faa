//! Market data fetch for one pass.

use std::time::Duration;

use moat_core::{ExchangeRates, PriceMap};
use moat_traits::market_data::{ExchangeRateSource, MarketDataProvider};
use moat_traits::TraitError;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{EngineError, EngineResult};

/// Retry schedule for the rate fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    /// Pause between attempts.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Creates a policy.
    #[must_use]
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    /// A single attempt, no retries.
    #[must_use]
    pub fn none() -> Self {
        Self::new(1, Duration::ZERO)
    }
}

/// Fetches rates, retrying on any failure until the policy is exhausted.
pub async fn fetch_rates(
    source: &dyn ExchangeRateSource,
    retry: &RetryPolicy,
) -> Result<ExchangeRates, TraitError> {
    let attempts = retry.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match source.get_rates().await {
            Ok(rates) => return Ok(rates),
            Err(e) if attempt < attempts => {
                warn!(attempt, max_attempts = attempts, error = %e, "rate fetch failed, retrying");
                tokio::time::sleep(retry.delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Fetches prices and rates concurrently.
///
/// Prices are requested once; rates follow the retry policy. Either failure
/// aborts the pass.
pub async fn fetch_market_data(
    provider: &MarketDataProvider,
    codes: &[String],
    retry: &RetryPolicy,
) -> EngineResult<(PriceMap, ExchangeRates)> {
    debug!(codes = codes.len(), "fetching market data");

    let prices = async {
        provider
            .prices
            .get_prices(codes)
            .await
            .map_err(|e| EngineError::market_data(format!("prices: {e}")))
    };
    let rates = async {
        fetch_rates(provider.rates.as_ref(), retry)
            .await
            .map_err(|e| EngineError::market_data(format!("exchange rates: {e}")))
    };

    tokio::try_join!(prices, rates)
}
