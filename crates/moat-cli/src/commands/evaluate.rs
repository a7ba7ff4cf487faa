//! Evaluate command implementation.
//!
//! Runs one full pass: fetch prices and rates, value securities, aggregate
//! holdings, and print the dashboard.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::SecondsFormat;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use moat_engine::{DashboardEngineBuilder, DashboardReport, RetryPolicy};
use moat_ext_file::{create_file_market_data, QuoteFormat};

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{format_amount, format_pct, print_json, print_output, print_section, KeyValue};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Dashboard configuration (TOML)
    #[arg(short, long, env = "MOAT_CONFIG")]
    pub config: PathBuf,

    /// Price file (CSV or captured quote response)
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Exchange rate document (JSON)
    #[arg(short, long)]
    pub rates: PathBuf,

    /// Layout of the price file: csv or tencent
    #[arg(long, default_value = "csv")]
    pub quote_format: QuoteFormat,

    /// Attempts for the rate fetch
    #[arg(long, default_value = "3")]
    pub retries: u32,

    /// Seconds between rate fetch attempts
    #[arg(long, default_value = "1")]
    pub retry_delay: u64,
}

#[derive(Debug, Serialize, Tabled)]
struct ValuationRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Score")]
    score: String,
    #[tabled(rename = "+5%")]
    score_up: String,
    #[tabled(rename = "-5%")]
    score_down: String,
    #[tabled(rename = "P/E")]
    actual_pe: String,
    #[tabled(rename = "Normal P/E")]
    normal_pe: String,
}

#[derive(Debug, Serialize, Tabled)]
struct WatchRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Debug, Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Target")]
    target: String,
    #[tabled(rename = "Deviation")]
    relative: String,
    #[tabled(rename = "Level")]
    level: String,
    #[tabled(rename = "Action")]
    action: String,
    #[tabled(rename = "CNY")]
    cny: String,
    #[tabled(rename = "USD")]
    usd: String,
    #[tabled(rename = "HKD")]
    hkd: String,
}

#[derive(Debug, Serialize, Tabled)]
struct PieRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    ratio: String,
}

/// Execute the evaluate command.
pub fn execute(args: EvaluateArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(&args.config)?;
    let provider = create_file_market_data(&args.prices, args.quote_format, &args.rates)?;

    let engine = DashboardEngineBuilder::new()
        .with_config(config)
        .with_market_data(provider)
        .with_retry(RetryPolicy::new(
            args.retries,
            Duration::from_secs(args.retry_delay),
        ))
        .build()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let report = runtime.block_on(engine.run())?;

    if format == OutputFormat::Json {
        return print_json(&report);
    }
    print_report(&report, format)
}

fn print_report(report: &DashboardReport, format: OutputFormat) -> Result<()> {
    let global = &report.global;
    let summary = vec![
        KeyValue::new(
            "Generated",
            report.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        KeyValue::amount("Grand total", global.grand_total),
        KeyValue::amount("Net asset value", global.clean_net_asset_value),
        KeyValue::amount("Collateral", global.collateral_value),
        KeyValue::amount("Leveraged total", global.leveraged_total),
        KeyValue::amount("Fixed debt", global.fixed_debt),
        KeyValue::amount("Max debt", global.max_debt),
        KeyValue::amount("Available debt", global.available_debt),
        KeyValue::new("Debt ratio", format!("{}", global.debt_ratio)),
        KeyValue::new("Annual yield", format!("{}%", global.annual_yield)),
        KeyValue::amount(
            format!("Share: {}", global.primary_share.name),
            global.primary_share.value,
        ),
        KeyValue::amount(
            format!("Share: {}", global.secondary_share.name),
            global.secondary_share.value,
        ),
        KeyValue::amount("Remainder", global.remainder_share),
        KeyValue::new("USD per CNY", format!("{}", report.rates.usd)),
        KeyValue::new("HKD per CNY", format!("{}", report.rates.hkd)),
    ];
    print_section("Portfolio", format);
    print_output(&summary, format)?;

    let valuations: Vec<ValuationRow> = report
        .valuations
        .iter()
        .map(|v| ValuationRow {
            name: v.name.clone(),
            code: v.code.clone(),
            price: format_amount(v.price),
            score: v.base.score.clone(),
            score_up: v.price_up.score.clone(),
            score_down: v.price_down.score.clone(),
            actual_pe: format_amount(v.actual_pe),
            normal_pe: format_amount(v.normal_pe()),
        })
        .collect();
    print_section("Valuations", format);
    print_output(&valuations, format)?;

    if !report.watchlist.is_empty() {
        let watch: Vec<WatchRow> = report
            .watchlist
            .iter()
            .map(|w| WatchRow {
                name: w.name.clone(),
                code: w.code.clone(),
                price: format!("{}", w.price),
            })
            .collect();
        print_section("Watchlist", format);
        print_output(&watch, format)?;
    }

    let allocations: Vec<AllocationRow> = report
        .allocations
        .iter()
        .map(|a| AllocationRow {
            tag: a.tag.clone(),
            current: format_amount(a.current_total),
            actual: format_pct(a.actual_ratio),
            target: format_pct(a.target_ratio),
            relative: format_pct(a.relative_deviation),
            level: a.level.to_string(),
            action: a.action.to_string(),
            cny: format_amount(a.deviation_cny),
            usd: format_amount(a.deviation_usd),
            hkd: format_amount(a.deviation_hkd),
        })
        .collect();
    print_section("Allocation", format);
    print_output(&allocations, format)?;

    let distribution: Vec<PieRow> = report
        .distribution
        .iter()
        .map(|p| PieRow {
            name: p.name.clone(),
            amount: format_amount(p.amount),
            ratio: format_pct(p.ratio),
        })
        .collect();
    print_section("Distribution", format);
    print_output(&distribution, format)
}
