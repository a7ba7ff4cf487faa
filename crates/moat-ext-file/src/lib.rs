//! # Moat Ext File
//!
//! File-based and static market data for the Moat dashboard engine.
//!
//! This crate provides default implementations for snapshots, offline runs
//! and tests:
//! - CSV price snapshots (`code,price`)
//! - Captured Tencent simple-quote responses
//! - Exchange-rate JSON documents in the `conversion_rates` shape
//! - In-memory static sources
//!
//! Live network feeds belong in their own extension crates.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod market_data;
mod tencent;

pub use market_data::*;
pub use tencent::{parse_tencent_quotes, prices_for_codes, tencent_symbol};

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use moat_core::{ExchangeRates, PriceMap};
use moat_traits::error::TraitError;
use moat_traits::market_data::{ExchangeRateSource, MarketDataProvider, PriceSource, SourceType};
use serde::{Deserialize, Serialize};

/// Layout of a price file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteFormat {
    /// `code,price` CSV.
    #[default]
    Csv,
    /// Captured Tencent simple-quote response.
    Tencent,
}

impl FromStr for QuoteFormat {
    type Err = TraitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tencent" | "qt" => Ok(Self::Tencent),
            other => Err(TraitError::InvalidInput(format!("unknown quote format: {other}"))),
        }
    }
}

/// Create a file-based price source in the given format.
pub fn create_price_source(
    path: impl AsRef<Path>,
    format: QuoteFormat,
) -> Result<Arc<dyn PriceSource>, TraitError> {
    Ok(match format {
        QuoteFormat::Csv => Arc::new(CsvPriceSource::new(path)?),
        QuoteFormat::Tencent => Arc::new(TencentQuoteSource::new(path)?),
    })
}

/// Create a file-based market data provider.
pub fn create_file_market_data(
    prices: impl AsRef<Path>,
    format: QuoteFormat,
    rates_json: impl AsRef<Path>,
) -> Result<MarketDataProvider, TraitError> {
    Ok(MarketDataProvider {
        prices: create_price_source(prices, format)?,
        rates: Arc::new(JsonExchangeRateSource::new(rates_json)),
    })
}

// =============================================================================
// STATIC SOURCES
// =============================================================================

/// Price source serving a fixed map.
#[derive(Debug, Clone, Default)]
pub struct StaticPriceSource {
    prices: PriceMap,
}

impl StaticPriceSource {
    /// Creates a source from a price map.
    pub fn new(prices: PriceMap) -> Self {
        Self { prices }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn get_prices(&self, codes: &[String]) -> Result<PriceMap, TraitError> {
        Ok(codes
            .iter()
            .filter_map(|code| self.prices.get(code).map(|p| (code.clone(), p)))
            .collect())
    }
}

/// Rate source serving a fixed pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticRateSource {
    rates: ExchangeRates,
}

impl StaticRateSource {
    /// Creates a source from a rate pair.
    pub fn new(rates: ExchangeRates) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl ExchangeRateSource for StaticRateSource {
    fn source_type(&self) -> SourceType {
        SourceType::Manual
    }

    async fn get_rates(&self) -> Result<ExchangeRates, TraitError> {
        Ok(self.rates)
    }
}
