pub mod config;
pub mod data_structures;
pub mod display;
pub mod suno;
pub mod worker;

use crate::config::{AppConfig, RunSpec, resolve_year};
use crate::display::OutputFormat;
use crate::suno::SunoClient;
use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use fscore::analysis::rank;
use fscore::services::UniverseLoader;
use fscore::{Timer, init_logger};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Rank listed equities by Piotroski F-Score.
#[derive(Parser, Debug)]
#[command(name = "fscore-screener", version, about)]
struct Cli {
    /// Run specification, e.g. "{'year': 2019}"
    spec: Option<String>,

    /// Rank the universe as of this calendar year
    #[arg(long)]
    year: Option<i32>,

    /// Maximum number of tickers fetched at once
    #[arg(long)]
    concurrency: Option<usize>,

    /// Directory holding universe.csv and universe_<YEAR>.csv
    #[arg(long)]
    universe_dir: Option<PathBuf>,

    /// Drop tickers whose liquidity is below this value
    #[arg(long)]
    min_liquidity: Option<f64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

impl Cli {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(concurrency) = self.concurrency {
            config.max_concurrency = concurrency;
        }
        if let Some(dir) = &self.universe_dir {
            config.universe_dir = dir.clone();
        }
        if let Some(min) = self.min_liquidity {
            config.min_liquidity = Some(min);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logger()?;

    let mut app_config = AppConfig::load().context("Failed to load configuration")?;
    cli.apply(&mut app_config);
    app_config.validate().context("Invalid configuration")?;

    let positional_year = match &cli.spec {
        Some(text) => RunSpec::parse(text)?.year,
        None => None,
    };
    let selection = resolve_year(positional_year, cli.year, Utc::now().year())?;

    info!(%selection, max_concurrency = app_config.max_concurrency, "Starting F-Score screen");

    let loader = UniverseLoader::new(app_config.universe_dir.clone());
    let mut universe = loader
        .load(selection)
        .with_context(|| format!("Failed to load universe from {}", loader.path_for(selection).display()))?;

    let dropped = universe.retain_positive_quotes();
    if dropped > 0 {
        info!(dropped, "Removed tickers without a positive quote");
    }
    if let Some(min) = app_config.min_liquidity {
        let dropped = universe
            .retain_min_attribute(&app_config.liquidity_column, min)
            .context("Failed to apply liquidity filter")?;
        info!(dropped, min, column = %app_config.liquidity_column, "Applied liquidity filter");
    }

    if let Err(err) = universe.ensure_not_empty() {
        println!("Nothing to rank: {}", err);
        return Ok(());
    }

    let client = Arc::new(
        SunoClient::new(&app_config.provider_base_url, app_config.request_timeout)
            .context("Failed to build provider client")?,
    );

    let tickers = universe.tickers();
    let timer = Timer::start("F-Score fan-out");
    let report = worker::score_universe(client, &tickers, app_config.max_concurrency).await;
    timer.log_elapsed();

    if !report.unavailable.is_empty() {
        warn!(
            count = report.unavailable.len(),
            total = tickers.len(),
            "Some tickers had no usable indicators and were scored as zero"
        );
        for (ticker, reason) in &report.unavailable {
            warn!(ticker = %ticker, %reason, "Indicators unavailable");
        }
    }

    let ranked = rank(&universe, &report.scores);
    display::render(&ranked, selection, cli.format, std::io::stdout().lock())
        .context("Failed to write ranking")?;

    Ok(())
}
