// Game discovery: find the team's completed games for a season.

use serde::Deserialize;
use tracing::{debug, info};

use super::{FetchError, StatsApi, StatsSource, Team};

/// Only games in exactly this state are tallied.
const FINAL_STATE: &str = "Final";

// ---------------------------------------------------------------------------
// Wire types (schedule endpoint)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub dates: Vec<ScheduleDate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ScheduleDate {
    pub games: Vec<ScheduledGame>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub game_pk: u64,
    #[serde(default)]
    pub status: GameStatus,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatus {
    pub detailed_state: String,
}

// ---------------------------------------------------------------------------
// Discovery
// ---------------------------------------------------------------------------

/// Game ids from `schedule` whose detailed state is exactly "Final", in
/// schedule order.
pub fn final_game_ids(schedule: &Schedule) -> Vec<u64> {
    schedule
        .dates
        .iter()
        .flat_map(|date| &date.games)
        .filter(|game| game.status.detailed_state == FINAL_STATE)
        .map(|game| game.game_pk)
        .collect()
}

impl<S: StatsSource> StatsApi<S> {
    /// Fetch the season schedule for `team` and return its completed games.
    ///
    /// A season the API has no data for yields an empty list.
    pub async fn discover_final_games(
        &self,
        team: Team,
        season: i32,
    ) -> Result<Vec<u64>, FetchError> {
        let url = self.schedule_url(team, season);
        let schedule: Schedule = self.get(&url).await?;
        let scheduled: usize = schedule.dates.iter().map(|d| d.games.len()).sum();
        let ids = final_game_ids(&schedule);
        debug!(scheduled, "schedule fetched");
        info!("{} final games for {} in {}", ids.len(), team.abbreviation, season);
        Ok(ids)
    }
}
