// Season tally entry point.
//
// Startup sequence:
// 1. Parse CLI arguments
// 2. Initialize tracing (stderr)
// 3. Load config, apply CLI overrides
// 4. Run the season pipeline on a single-threaded runtime
// 5. Log the run summary

use std::path::PathBuf;

use anyhow::Context;
use boxtally_core::api::{HttpStatsSource, StatsApi, BRAVES};
use boxtally_core::{config, pipeline};
use chrono::Datelike;
use clap::Parser;
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "boxtally")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Tally a season of Braves box scores into per-player totals", long_about = None)]
struct Cli {
    /// Season year (default: current calendar year)
    #[arg(short, long, env = "BOXTALLY_SEASON")]
    season: Option<i32>,

    /// Output CSV path (overrides the config file)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Config file (default: config/boxtally.toml if present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing()?;

    let mut config =
        config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(output) = cli.output {
        config.output.path = output;
    }
    let season = cli.season.unwrap_or_else(|| chrono::Local::now().year());
    info!(
        "Tallying {} season {} from {}",
        BRAVES.abbreviation, season, config.api.base_url
    );

    let api = StatsApi::new(HttpStatsSource::new(), config.api.clone());
    let summary = pipeline::run(&api, BRAVES, season, &config.output.path).await?;

    info!(
        games_discovered = summary.games_discovered,
        games_tallied = summary.games_tallied,
        games_skipped = summary.games_skipped,
        players_written = summary.players_written,
        "Wrote {}",
        config.output.path.display()
    );
    Ok(())
}

/// Initialize tracing to stderr so stdout stays free for other tooling.
fn init_tracing() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("boxtally=info,boxtally_core=info,warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
