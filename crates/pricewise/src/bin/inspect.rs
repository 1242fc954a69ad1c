//! Print a dataset summary, its selection vocabularies and one series as JSON.
//!
//! Usage: `inspect --in <PATH> [--commodity C] [--region R] [--months N]`
//! Example: `inspect --in data/prices.csv --commodity "Rice (imported)" --region Southern`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pricewise::dataset::{Dataset, Selection};
use serde_json::json;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// Default series window in months.
const DEFAULT_MONTHS: usize = 18;

/// Resolve a price export and show what it contains.
#[derive(Debug, Parser)]
#[command(name = "inspect", version, about)]
struct Args {
    /// Input CSV or spreadsheet.
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Commodity to select; `price` selects all.
    #[arg(long, default_value = "price")]
    commodity: String,

    /// Region to select; `All` selects all.
    #[arg(long, default_value = "All")]
    region: String,

    /// Number of most recent rows in the series; 0 keeps all.
    #[arg(long, default_value_t = DEFAULT_MONTHS)]
    months: usize,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).with_writer(std::io::stderr).init();

    let args = Args::parse();
    let dataset =
        Dataset::open(&args.input).with_context(|| format!("loading {}", args.input.display()))?;

    let selection =
        Selection::new().commodity(&args.commodity).region(&args.region).months(args.months);
    let latest = match dataset.latest(&selection) {
        Ok(row) => Some(row),
        Err(e) if e.is_recoverable() => {
            warn!(error = %e, "empty selection");
            None
        }
        Err(e) => return Err(e.into()),
    };

    let report = json!({
        "summary": dataset.summary(),
        "options": dataset.options(),
        "selection": { "commodity": args.commodity, "region": args.region, "months": args.months },
        "series": dataset.series(&selection),
        "latest": latest,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
