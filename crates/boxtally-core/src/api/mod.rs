// MLB Stats API access: URL building, game discovery, and box-score extraction.

pub mod boxscore;
pub mod schedule;
pub mod source;

use serde::de::DeserializeOwned;

use crate::config::ApiConfig;
pub use boxscore::TeamBox;
pub use source::{FetchError, HttpStatsSource, StatsSource};

// ---------------------------------------------------------------------------
// Team
// ---------------------------------------------------------------------------

/// The club whose games are tallied. Fixed at compile time for this tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Team {
    /// Numeric team id used by the schedule endpoint.
    pub id: u32,
    /// Abbreviation used to find the team's side in a box score.
    pub abbreviation: &'static str,
}

pub const BRAVES: Team = Team {
    id: 144,
    abbreviation: "ATL",
};

// ---------------------------------------------------------------------------
// StatsApi
// ---------------------------------------------------------------------------

/// Typed client over a [`StatsSource`].
pub struct StatsApi<S> {
    source: S,
    config: ApiConfig,
}

impl<S: StatsSource> StatsApi<S> {
    pub fn new(source: S, config: ApiConfig) -> Self {
        Self { source, config }
    }

    pub fn schedule_url(&self, team: Team, season: i32) -> String {
        format!(
            "{}/schedule?sportId={}&teamId={}&season={}&gameType={}",
            self.base_url(),
            self.config.sport_id,
            team.id,
            season,
            self.config.game_type
        )
    }

    pub fn boxscore_url(&self, game_pk: u64) -> String {
        format!("{}/game/{game_pk}/boxscore", self.base_url())
    }

    fn base_url(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    /// Fetch `url` and decode it into `T`.
    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        let value = self.source.fetch_json(url).await?;
        serde_json::from_value(value).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::Value;

    struct Unreachable;

    #[async_trait]
    impl StatsSource for Unreachable {
        async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
            Err(FetchError::Status {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[test]
    fn schedule_url_carries_all_filters() {
        let api = StatsApi::new(Unreachable, ApiConfig::default());
        assert_eq!(
            api.schedule_url(BRAVES, 2024),
            "https://statsapi.mlb.com/api/v1/schedule?sportId=1&teamId=144&season=2024&gameType=R"
        );
    }

    #[test]
    fn boxscore_url_ignores_trailing_slash() {
        let config = ApiConfig {
            base_url: "http://localhost:8080/api/v1/".into(),
            ..ApiConfig::default()
        };
        let api = StatsApi::new(Unreachable, config);
        assert_eq!(
            api.boxscore_url(745_123),
            "http://localhost:8080/api/v1/game/745123/boxscore"
        );
    }
}
