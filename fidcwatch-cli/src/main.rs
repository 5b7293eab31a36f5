//! FidcWatch CLI — data validation and demo dataset commands.
//!
//! Commands:
//! - `check` — run the loader once and print a load report
//! - `sample` — write a deterministic demo dataset in the split layout

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use fidcwatch_core::data::{load_portfolio, SourceLayout};
use fidcwatch_core::sample::write_sample_dataset;

#[derive(Parser)]
#[command(
    name = "fidcwatch",
    about = "FidcWatch CLI — FIDC monitoring data tools"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate source files and print a load report without starting the UI.
    Check {
        /// Split-layout data directory (fund_data.csv, covenants.csv, macro_data.csv).
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Consolidated single-file export; takes precedence over --data-dir.
        #[arg(long)]
        file: Option<PathBuf>,

        /// TOML config naming the source (keys: `data_dir` or `file`).
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Write a deterministic demo dataset in the split layout.
    Sample {
        /// Output directory. Created if missing.
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,

        /// Overwrite existing files.
        #[arg(long, default_value_t = false)]
        force: bool,
    },
}

/// TOML shape for `check --config`.
#[derive(Debug, Deserialize)]
struct SourceConfig {
    data_dir: Option<PathBuf>,
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check {
            data_dir,
            file,
            config,
        } => cmd_check(data_dir, file, config),
        Commands::Sample { out_dir, force } => cmd_sample(&out_dir, force),
    }
}

fn resolve_layout(
    data_dir: PathBuf,
    file: Option<PathBuf>,
    config: Option<PathBuf>,
) -> Result<SourceLayout> {
    if let Some(file) = file {
        return Ok(SourceLayout::consolidated(file));
    }
    if let Some(config_path) = config {
        let text = std::fs::read_to_string(&config_path)
            .with_context(|| format!("failed to read config {}", config_path.display()))?;
        let parsed: SourceConfig = toml::from_str(&text)
            .with_context(|| format!("invalid config {}", config_path.display()))?;
        return match (parsed.file, parsed.data_dir) {
            (Some(file), _) => Ok(SourceLayout::consolidated(file)),
            (None, Some(dir)) => Ok(SourceLayout::split(dir)),
            (None, None) => bail!(
                "config {} names neither `file` nor `data_dir`",
                config_path.display()
            ),
        };
    }
    Ok(SourceLayout::split(data_dir))
}

fn cmd_check(data_dir: PathBuf, file: Option<PathBuf>, config: Option<PathBuf>) -> Result<()> {
    let layout = resolve_layout(data_dir, file, config)?;
    println!("Checking {} ...", layout.describe());

    let data = load_portfolio(&layout).context("fund dataset unavailable")?;

    let ids = data.fund_ids();
    println!("  funds:      {}", ids.len());
    println!("  rows:       {}", data.funds.len());

    let dates: Vec<_> = data.funds.iter().filter_map(|r| r.reference_date).collect();
    match (dates.iter().min(), dates.iter().max()) {
        (Some(first), Some(last)) => println!("  dates:      {first} .. {last}"),
        _ => println!("  dates:      (none parseable)"),
    }

    println!(
        "  families:   {} status, {} tranches, {} delinquency, {} aging",
        data.schema.status.len(),
        data.schema.tranches.len(),
        data.schema.delinquency.len(),
        data.schema.aging.len()
    );
    println!(
        "  covenants:  {}",
        match &data.covenants {
            Some(records) => format!("{} observations", records.len()),
            None => "unavailable".to_string(),
        }
    );
    println!(
        "  macro:      {}",
        match &data.macro_series {
            Some(records) =>
                format!("{} rows, indicators: {}", records.len(), data.macro_indicators.join(", ")),
            None => "unavailable".to_string(),
        }
    );
    println!("  fingerprint {}", data.dataset_hash);

    if data.issues.is_empty() {
        println!("OK: no load issues.");
    } else {
        println!("{} issue(s):", data.issues.len());
        for issue in &data.issues {
            println!("  - {issue}");
        }
    }

    Ok(())
}

fn cmd_sample(out_dir: &PathBuf, force: bool) -> Result<()> {
    let fund_file = out_dir.join(fidcwatch_core::data::layout::FUND_FILE);
    if fund_file.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            fund_file.display()
        );
    }

    write_sample_dataset(out_dir)
        .with_context(|| format!("failed to write sample dataset to {}", out_dir.display()))?;

    println!("Sample dataset written to {}", out_dir.display());
    println!("Run `fidcwatch check --data-dir {}` or start the TUI.", out_dir.display());
    Ok(())
}
