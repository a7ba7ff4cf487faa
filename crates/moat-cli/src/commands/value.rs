//! Value command implementation.
//!
//! Scores one configured security at a price given on the command line.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use moat_valuation::value_security;

use crate::cli::OutputFormat;
use crate::commands::{load_config, validate_price};
use crate::error::CliError;
use crate::output::{print_header, print_json, print_output, KeyValue};

/// Arguments for the value command.
#[derive(Args, Debug)]
pub struct ValueArgs {
    /// Dashboard configuration (TOML)
    #[arg(short, long, env = "MOAT_CONFIG")]
    pub config: PathBuf,

    /// Security name as configured
    #[arg(short, long)]
    pub name: String,

    /// Price to value the security at
    #[arg(short, long)]
    pub price: f64,
}

/// Execute the value command.
pub fn execute(args: ValueArgs, format: OutputFormat) -> Result<()> {
    let price = validate_price(args.price)?;
    let config = load_config(&args.config)?;
    let security = config
        .security(&args.name)
        .ok_or_else(|| CliError::UnknownSecurity(args.name.clone()))?;

    let result = value_security(security, price, &config.valuation);

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    let results = vec![
        KeyValue::new("Security", format!("{} ({})", result.name, result.code)),
        KeyValue::new("Price", format!("{:.2}", result.price)),
        KeyValue::new("Score", result.base.score.clone()),
        KeyValue::new(
            format!("Score @ {:.2}", result.price_up.price),
            result.price_up.score.clone(),
        ),
        KeyValue::new(
            format!("Score @ {:.2}", result.price_down.price),
            result.price_down.score.clone(),
        ),
        KeyValue::new("Actual P/E", format!("{:.2}", result.actual_pe)),
        KeyValue::new("ROIC P/E", format!("{:.2}", result.components.roic_pe)),
        KeyValue::new("History P/E", format!("{:.2}", result.components.history_pe)),
        KeyValue::new("Growth P/E", format!("{:.2}", result.components.grow_pe)),
        KeyValue::new("Normal P/E", format!("{:.2}", result.normal_pe())),
        KeyValue::new("ROIC", format!("{:.2}", result.roic)),
        KeyValue::new("Cash conversion", format!("{:.4}", result.cash_conversion)),
        KeyValue::new("Long-run growth", format!("{:.4}", result.growth)),
    ];

    if format == OutputFormat::Table {
        print_header("Valuation");
    }
    print_output(&results, format)
}
