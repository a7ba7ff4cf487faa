//! Moat CLI - valuation scores and allocation dashboard from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Run a full evaluation pass
//! moat evaluate --config moat.toml --prices prices.csv --rates rates.json
//!
//! # Same, from a captured Tencent quote response
//! moat evaluate --config moat.toml --prices quotes.txt --quote-format tencent --rates rates.json
//!
//! # Value one security at a given price
//! moat value --config moat.toml --name Moutai --price 1500
//!
//! # Validate a configuration
//! moat config --config moat.toml
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays parseable
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(cli.quiet)),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let format = cli.format;

    match cli.command {
        Commands::Evaluate(args) => commands::evaluate::execute(args, format)?,
        Commands::Value(args) => commands::value::execute(args, format)?,
        Commands::Config(args) => commands::config::execute(args, format)?,
    }

    Ok(())
}

fn default_filter(quiet: bool) -> String {
    if quiet {
        "error".to_string()
    } else {
        "warn,moat=info".to_string()
    }
}
