//! Market data source traits.
//!
//! These traits define interfaces for the two inputs of an evaluation pass:
//! - [`PriceSource`]: Security prices keyed by quote code
//! - [`ExchangeRateSource`]: The USD/HKD rate pair against CNY
//!
//! Sources report failure as a [`TraitError`]; an evaluation pass never
//! starts on partial data.

use std::sync::Arc;

use async_trait::async_trait;
use moat_core::{ExchangeRates, PriceMap};
use serde::{Deserialize, Serialize};

use crate::error::TraitError;

/// Source type for market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceType {
    /// Snapshot/request-response (quote APIs, rate APIs)
    Snapshot,
    /// File-based (CSV, JSON, captured quote responses)
    File,
    /// In-memory values supplied by the caller
    Manual,
}

// =============================================================================
// PRICE SOURCE
// =============================================================================

/// Source of security prices.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get prices for the given codes.
    ///
    /// Codes the source does not know are left out of the map; callers
    /// resolve them to 0.
    async fn get_prices(&self, codes: &[String]) -> Result<PriceMap, TraitError>;
}

// =============================================================================
// EXCHANGE RATE SOURCE
// =============================================================================

/// Source of exchange rates, quoted as foreign units per 1 CNY.
#[async_trait]
pub trait ExchangeRateSource: Send + Sync {
    /// Source type.
    fn source_type(&self) -> SourceType;

    /// Get the current rate pair.
    async fn get_rates(&self) -> Result<ExchangeRates, TraitError>;
}

// =============================================================================
// COMPOSITE MARKET DATA PROVIDER
// =============================================================================

/// Combined market data provider (concrete struct holding both sources).
#[derive(Clone)]
pub struct MarketDataProvider {
    /// Price source
    pub prices: Arc<dyn PriceSource>,
    /// Exchange rate source
    pub rates: Arc<dyn ExchangeRateSource>,
}

impl MarketDataProvider {
    /// Creates a provider from two sources.
    pub fn new(prices: Arc<dyn PriceSource>, rates: Arc<dyn ExchangeRateSource>) -> Self {
        Self { prices, rates }
    }
}

impl std::fmt::Debug for MarketDataProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataProvider")
            .field("prices", &self.prices.source_type())
            .field("rates", &self.rates.source_type())
            .finish()
    }
}
