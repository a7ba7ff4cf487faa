//! End-to-end passes over file-backed market data.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use moat_core::{ExchangeRates, PriceMap};
use moat_engine::{DashboardConfig, DashboardEngineBuilder, EngineError, RetryPolicy};
use moat_ext_file::{
    create_file_market_data, CsvPriceSource, JsonExchangeRateSource, QuoteFormat,
    StaticPriceSource, StaticRateSource,
};
use moat_portfolio::allocation::{DeviationLevel, RebalanceAction};
use moat_valuation::SecurityFundamentals;

const CONFIG: &str = r#"
[policy]
collateral_ratio = 0.25

[[policy.targets]]
tag = "equity"
ratio = 50.0

[[policy.targets]]
tag = "hk"
ratio = 30.0

[[policy.targets]]
tag = "bond"
ratio = 20.0

[[holdings]]
tag = "equity"
code = "SH600001"
quantity = 100.0
collateral = true

[[holdings]]
tag = "hk"
code = "HK00700"
quantity = 10.0
currency = "HKD"

[[holdings]]
tag = "bond"
quantity = 200.0

[[securities]]
name = "Alpha"
code = "SH600001"
discount = 1.0
roic_history = [20.0, 20.0, 20.0]
forward_eps = 1.0

[[securities]]
name = "Tencent"
code = "HK00700"
discount = 1.0
price_only = true
"#;

fn write_temp(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn fast_retry() -> RetryPolicy {
    RetryPolicy::new(2, Duration::from_millis(1))
}

// =============================================================================
// FULL PASS
// =============================================================================

#[tokio::test]
async fn test_pass_over_csv_and_json() {
    let config_file = write_temp(CONFIG);
    let prices = write_temp("code,price\nSH600001,10\nHK00700,100\n");
    let rates = write_temp(r#"{"result": "success", "conversion_rates": {"USD": 0.14, "HKD": 1.25}}"#);

    let engine = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::from_file(config_file.path()).unwrap())
        .with_prices(Arc::new(CsvPriceSource::new(prices.path()).unwrap()))
        .with_rates(Arc::new(JsonExchangeRateSource::new(rates.path())))
        .with_retry(fast_retry())
        .build()
        .unwrap();

    let report = engine.run().await.unwrap();

    // 1000 CNY + 1000 HKD / 1.25 + 200 CNY
    assert_relative_eq!(report.global.grand_total, 2000.0);
    assert_relative_eq!(report.global.collateral_value, 1000.0);
    assert_relative_eq!(report.global.max_debt, 250.0);
    assert_relative_eq!(report.global.leveraged_total, 2250.0);
    assert_eq!(report.rates, ExchangeRates::new(0.14, 1.25));

    let tags: Vec<&str> = report.allocations.iter().map(|a| a.tag.as_str()).collect();
    assert_eq!(tags, vec!["equity", "hk", "bond"]);

    let bond = report.allocation("bond").unwrap();
    assert_relative_eq!(bond.target_amount, 450.0);
    assert_relative_eq!(bond.deviation_cny, -250.0);
    assert_relative_eq!(bond.deviation_hkd, -312.5);
    assert_eq!(bond.action, RebalanceAction::Add);
    assert_eq!(bond.level, DeviationLevel::Alert);

    assert_eq!(report.valuations.len(), 1);
    assert_eq!(report.valuations[0].name, "Alpha");
    assert_eq!(report.watchlist.len(), 1);
    assert_eq!(report.watchlist[0].price, 100.0);

    let amounts: Vec<f64> = report.distribution.iter().map(|p| p.amount).collect();
    assert_eq!(amounts, vec![1000.0, 800.0, 200.0]);
}

#[tokio::test]
async fn test_pass_over_tencent_capture() {
    let quotes = write_temp(concat!(
        "v_s_sh600001=\"1~Alpha~600001~10.00~0.1\";\n",
        "v_s_hk00700=\"100~Tencent~00700~100.000~2.6\";\n",
    ));
    let rates = write_temp(r#"{"conversion_rates": {"USD": 0.14, "HKD": 1.25}}"#);
    let provider = create_file_market_data(quotes.path(), QuoteFormat::Tencent, rates.path()).unwrap();

    let engine = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::from_toml(CONFIG).unwrap())
        .with_market_data(provider)
        .build()
        .unwrap();

    let report = engine.run().await.unwrap();
    assert_relative_eq!(report.global.grand_total, 2000.0);
}

#[tokio::test]
async fn test_unheld_price_only_security_is_quoted_not_valued() {
    let mut config = DashboardConfig::from_toml(CONFIG).unwrap();
    config
        .securities
        .push(SecurityFundamentals::new("Gold ETF", "SH518880", 1.0).price_only());
    assert!(config.quote_codes().contains(&"SH518880".to_string()));

    let prices = PriceMap::new()
        .with_price("SH600001", 10.0)
        .with_price("HK00700", 100.0)
        .with_price("SH518880", 5.6);
    let engine = DashboardEngineBuilder::new()
        .with_config(config)
        .with_prices(Arc::new(StaticPriceSource::new(prices)))
        .with_rates(Arc::new(StaticRateSource::new(ExchangeRates::new(0.14, 1.25))))
        .build()
        .unwrap();

    let report = engine.run().await.unwrap();
    assert!(report.valuations.iter().all(|v| v.code != "SH518880"));

    let gold = report.watchlist.iter().find(|w| w.code == "SH518880").unwrap();
    assert_eq!(gold.price, 5.6);
    assert_relative_eq!(report.global.grand_total, 2000.0);
}

// =============================================================================
// FAILURES
// =============================================================================

#[tokio::test]
async fn test_missing_rates_aborts_pass() {
    let engine = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::from_toml(CONFIG).unwrap())
        .with_prices(Arc::new(StaticPriceSource::new(PriceMap::new())))
        .with_rates(Arc::new(JsonExchangeRateSource::new("/nonexistent/rates.json")))
        .with_retry(fast_retry())
        .build()
        .unwrap();

    assert!(matches!(engine.run().await, Err(EngineError::MarketData(_))));
}

#[tokio::test]
async fn test_rate_error_document_aborts_pass() {
    let rates = write_temp(r#"{"result": "error", "error-type": "quota-reached"}"#);
    let engine = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::from_toml(CONFIG).unwrap())
        .with_prices(Arc::new(StaticPriceSource::default()))
        .with_rates(Arc::new(JsonExchangeRateSource::new(rates.path())))
        .with_retry(fast_retry())
        .build()
        .unwrap();

    let err = engine.run().await.unwrap_err();
    assert!(err.to_string().contains("quota-reached"));
}

#[test]
fn test_builder_requires_everything() {
    let err = DashboardEngineBuilder::new()
        .with_prices(Arc::new(StaticPriceSource::default()))
        .with_rates(Arc::new(StaticRateSource::default()))
        .build()
        .unwrap_err();
    assert!(matches!(err, EngineError::ConfigError(_)));

    let err = DashboardEngineBuilder::new()
        .with_config(DashboardConfig::default())
        .with_rates(Arc::new(StaticRateSource::default()))
        .build()
        .unwrap_err();
    assert!(err.to_string().contains("price source"));
}

#[test]
fn test_builder_validates_config() {
    let mut config = DashboardConfig::from_toml(CONFIG).unwrap();
    config.policy.fixed_debt = -1.0;

    let result = DashboardEngineBuilder::new()
        .with_config(config)
        .with_prices(Arc::new(StaticPriceSource::default()))
        .with_rates(Arc::new(StaticRateSource::default()))
        .build();
    assert!(matches!(result, Err(EngineError::ConfigError(_))));
}
