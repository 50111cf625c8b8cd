// End-to-end season run: discover games, extract each box score in turn,
// aggregate, and write the report.

use std::path::Path;

use anyhow::Context;
use tracing::info;

use crate::api::{StatsApi, StatsSource, Team, TeamBox};
use crate::report;
use crate::stats::{SeasonAggregator, SeasonRecord};

/// What a run did, for logging by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub games_discovered: usize,
    pub games_tallied: usize,
    /// Games whose box score did not include the team.
    pub games_skipped: usize,
    pub players_written: usize,
}

/// Fetch every final game for `team` in `season` and fold them into season
/// totals. Games are fetched one at a time, in schedule order.
pub async fn collect_season<S: StatsSource>(
    api: &StatsApi<S>,
    team: Team,
    season: i32,
) -> anyhow::Result<(Vec<SeasonRecord>, RunSummary)> {
    info!("Fetching game IDs...");
    let game_ids = api
        .discover_final_games(team, season)
        .await
        .with_context(|| format!("failed to discover {season} games"))?;

    let mut summary = RunSummary {
        games_discovered: game_ids.len(),
        ..RunSummary::default()
    };
    let mut aggregator = SeasonAggregator::new();

    for (idx, game_pk) in game_ids.iter().copied().enumerate() {
        info!("Processing game {}/{}: {}", idx + 1, game_ids.len(), game_pk);
        let team_box = api
            .fetch_team_box(team, game_pk)
            .await
            .with_context(|| format!("failed to fetch box score for game {game_pk}"))?;
        match team_box {
            TeamBox::Found(records) => {
                aggregator.extend(&records);
                summary.games_tallied += 1;
            }
            TeamBox::TeamNotFound => summary.games_skipped += 1,
        }
    }

    info!("Aggregating player stats...");
    let totals = aggregator.finish();
    summary.players_written = totals.len();
    Ok((totals, summary))
}

/// Run a full season tally and write the report to `output`.
pub async fn run<S: StatsSource>(
    api: &StatsApi<S>,
    team: Team,
    season: i32,
    output: &Path,
) -> anyhow::Result<RunSummary> {
    let (totals, summary) = collect_season(api, team, season).await?;
    info!(
        "Saving aggregated stats for {} players to {}",
        totals.len(),
        output.display()
    );
    report::write_report(output, &totals).context("failed to write season report")?;
    Ok(summary)
}
