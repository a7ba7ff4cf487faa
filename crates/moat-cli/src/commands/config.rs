//! Config command implementation.
//!
//! Validates a dashboard configuration and summarises what a pass would use.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::OutputFormat;
use crate::commands::load_config;
use crate::output::{format_pct, print_json, print_output, print_section, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Dashboard configuration (TOML)
    #[arg(short, long, env = "MOAT_CONFIG")]
    pub config: PathBuf,
}

/// One configured target.
#[derive(Debug, Serialize, Tabled)]
struct TargetRow {
    #[tabled(rename = "Tag")]
    tag: String,
    #[tabled(rename = "Target")]
    ratio: String,
}

/// Summary printed for JSON output.
#[derive(Debug, Serialize)]
struct ConfigSummary {
    holdings: usize,
    securities: usize,
    price_only: usize,
    target_sum: f64,
    quote_codes: Vec<String>,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, format: OutputFormat) -> Result<()> {
    let config = load_config(&args.config)?;

    let price_only = config.securities.iter().filter(|s| s.price_only).count();
    let target_sum = config.policy.target_sum();
    let summary = ConfigSummary {
        holdings: config.holdings.len(),
        securities: config.securities.len(),
        price_only,
        target_sum,
        quote_codes: config.quote_codes(),
    };

    if format == OutputFormat::Json {
        return print_json(&summary);
    }

    if format == OutputFormat::Table {
        print_success(&format!("{} is valid", args.config.display()));
        if !config.policy.targets.is_empty() && (target_sum - 100.0).abs() > 1e-6 {
            print_warning(&format!("target ratios sum to {target_sum}, not 100"));
        }
    }

    let results = vec![
        KeyValue::new("Holdings", summary.holdings.to_string()),
        KeyValue::new("Securities", summary.securities.to_string()),
        KeyValue::new("Price-only", summary.price_only.to_string()),
        KeyValue::new("Quote codes", summary.quote_codes.join(" ")),
        KeyValue::new("Fixed debt", format!("{:.2}", config.policy.fixed_debt)),
        KeyValue::new("Collateral ratio", format!("{}", config.policy.collateral_ratio)),
    ];
    print_section("Summary", format);
    print_output(&results, format)?;

    let targets: Vec<TargetRow> = config
        .policy
        .targets
        .iter()
        .map(|t| TargetRow {
            tag: t.tag.clone(),
            ratio: format_pct(t.ratio),
        })
        .collect();
    print_section("Targets", format);
    print_output(&targets, format)
}
