//! Prepare a leakage-safe feature table from a raw monthly price export.
//!
//! Usage: `prepare --in <PATH> --out <PATH> [--cpi-col NAME]`
//! Example: `prepare --in data/prices.csv --out data/features.csv --cpi-col CPI`

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use pricewise::{
    dataset::NormalizeConfig,
    features::RetentionPolicy,
    pipeline::{PrepareOptions, prepare},
};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

/// Build lags, rolling means, seasonal and spatial dummies and forward
/// targets per (commodity, market), plus a feature manifest.
#[derive(Debug, Parser)]
#[command(name = "prepare", version, about)]
struct Args {
    /// Input CSV or spreadsheet.
    #[arg(long = "in", value_name = "PATH")]
    input: PathBuf,

    /// Output CSV; the manifest is written next to it as `<stem>.features.json`.
    #[arg(long = "out", value_name = "PATH")]
    output: PathBuf,

    /// CPI column used to deflate prices.
    #[arg(long = "cpi-col", value_name = "NAME")]
    cpi_col: Option<String>,

    /// Also drop rows missing any forward target.
    #[arg(long)]
    require_targets: bool,

    /// Emit the winsorized `price_smoothed` diagnostic column.
    #[arg(long)]
    diagnostics: bool,

    /// Skip month-of-year dummies.
    #[arg(long)]
    no_seasonal: bool,

    /// Skip market dummies.
    #[arg(long)]
    no_spatial: bool,
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let args = Args::parse();

    let mut options = PrepareOptions::new(&args.input, &args.output);
    options.normalize = NormalizeConfig { cpi_column: args.cpi_col.clone() };
    options.engine.seasonal = !args.no_seasonal;
    options.engine.spatial = !args.no_spatial;
    options.engine.diagnostics = args.diagnostics;
    if args.require_targets {
        options.engine.retention = RetentionPolicy::RequireHistoryAndTargets;
    }

    let report = prepare(&options).with_context(|| {
        format!("preparing features from {} into {}", args.input.display(), args.output.display())
    })?;

    info!(
        mode = %report.summary.mode,
        date = %report.summary.date_column,
        price = %report.summary.price_column,
        region = %report.summary.region_column,
        features = report.written.manifest.len(),
        "done"
    );
    Ok(())
}
