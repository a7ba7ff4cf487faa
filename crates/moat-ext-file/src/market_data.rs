//! File-based market data sources.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{debug, warn};

use moat_core::{ExchangeRates, PriceMap};
use moat_traits::error::TraitError;
use moat_traits::market_data::*;

use crate::tencent::{parse_tencent_quotes, tencent_symbol};

// =============================================================================
// CSV PRICE SOURCE
// =============================================================================

/// CSV record for prices.
#[derive(Debug, Deserialize)]
struct PriceRecord {
    code: String,
    price: Option<f64>,
}

/// CSV-based price source (`code,price` rows) for snapshots and testing.
pub struct CsvPriceSource {
    file_path: PathBuf,
    prices: DashMap<String, f64>,
}

impl CsvPriceSource {
    /// Create a new CSV price source.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            prices: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload prices from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        if !self.file_path.exists() {
            return Err(TraitError::NotFound(self.file_path.display().to_string()));
        }

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)
            .map_err(|e| TraitError::IoError(e.to_string()))?;

        self.prices.clear();
        for result in reader.deserialize() {
            let record: PriceRecord = result.map_err(|e| TraitError::ParseError(e.to_string()))?;
            let price = record.price.filter(|p| p.is_finite()).unwrap_or(0.0);
            self.prices.insert(record.code, price);
        }

        debug!(path = %self.file_path.display(), count = self.prices.len(), "loaded price snapshot");
        Ok(())
    }

    /// Number of codes loaded.
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Returns true if no prices are loaded.
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[async_trait]
impl PriceSource for CsvPriceSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_prices(&self, codes: &[String]) -> Result<PriceMap, TraitError> {
        Ok(codes
            .iter()
            .filter_map(|code| self.prices.get(code).map(|p| (code.clone(), *p)))
            .collect())
    }
}

// =============================================================================
// TENCENT QUOTE SOURCE
// =============================================================================

/// Price source backed by a captured Tencent simple-quote response.
pub struct TencentQuoteSource {
    file_path: PathBuf,
    quotes: DashMap<String, f64>,
}

impl TencentQuoteSource {
    /// Create a new source from a captured response file.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self, TraitError> {
        let source = Self {
            file_path: file_path.as_ref().to_path_buf(),
            quotes: DashMap::new(),
        };
        source.reload()?;
        Ok(source)
    }

    /// Reload quotes from file.
    pub fn reload(&self) -> Result<(), TraitError> {
        let content = std::fs::read_to_string(&self.file_path)
            .map_err(|e| TraitError::IoError(format!("{}: {e}", self.file_path.display())))?;

        self.quotes.clear();
        for (symbol, price) in parse_tencent_quotes(&content) {
            self.quotes.insert(symbol, price);
        }

        debug!(path = %self.file_path.display(), count = self.quotes.len(), "loaded quote capture");
        Ok(())
    }
}

#[async_trait]
impl PriceSource for TencentQuoteSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_prices(&self, codes: &[String]) -> Result<PriceMap, TraitError> {
        Ok(codes
            .iter()
            .filter_map(|code| {
                self.quotes
                    .get(&tencent_symbol(code))
                    .map(|p| (code.clone(), *p))
            })
            .collect())
    }
}

// =============================================================================
// JSON EXCHANGE RATE SOURCE
// =============================================================================

/// Rate document in the `latest/CNY` shape.
#[derive(Debug, Deserialize)]
struct RateDocument {
    #[serde(default)]
    result: Option<String>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

/// Exchange rates read from a `{"conversion_rates": {"USD": .., "HKD": ..}}`
/// document quoted against CNY.
///
/// The file is read on every request, so a document replaced between retries
/// is picked up.
pub struct JsonExchangeRateSource {
    file_path: PathBuf,
}

impl JsonExchangeRateSource {
    /// Create a new JSON rate source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Parses a rate document.
    pub fn parse(content: &str) -> Result<ExchangeRates, TraitError> {
        let doc: RateDocument =
            serde_json::from_str(content).map_err(|e| TraitError::ParseError(e.to_string()))?;

        if doc.result.as_deref() == Some("error") {
            return Err(TraitError::SourceNotAvailable(
                doc.error_type.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        let rates = doc
            .conversion_rates
            .ok_or_else(|| TraitError::ParseError("missing conversion_rates".into()))?;
        let pick = |currency: &str| {
            rates
                .get(currency)
                .copied()
                .ok_or_else(|| TraitError::ParseError(format!("missing {currency} rate")))
        };

        ExchangeRates::try_new(pick("USD")?, pick("HKD")?).map_err(TraitError::from)
    }
}

#[async_trait]
impl ExchangeRateSource for JsonExchangeRateSource {
    fn source_type(&self) -> SourceType {
        SourceType::File
    }

    async fn get_rates(&self) -> Result<ExchangeRates, TraitError> {
        let content = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| TraitError::IoError(format!("{}: {e}", self.file_path.display())))?;

        let rates = Self::parse(&content);
        if let Err(e) = &rates {
            warn!(path = %self.file_path.display(), error = %e, "rate document rejected");
        }
        rates
    }
}
