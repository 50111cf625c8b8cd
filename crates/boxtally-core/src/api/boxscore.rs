// Per-game extraction: locate the team's side of a box score and flatten
// every player who appeared into a `GameRecord`.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use super::{FetchError, StatsApi, StatsSource, Team};
use crate::stats::{BattingLine, FieldingLine, GameRecord, PitchingLine};

// ---------------------------------------------------------------------------
// Result of a single-game extraction
// ---------------------------------------------------------------------------

/// Outcome of looking for the team inside one box score.
///
/// `TeamNotFound` is a soft miss: the game contributes nothing but the run
/// continues. Transport and decode failures are reported separately as
/// [`FetchError`].
#[derive(Debug, Clone, PartialEq)]
pub enum TeamBox {
    Found(Vec<GameRecord>),
    TeamNotFound,
}

impl TeamBox {
    /// The extracted records, empty when the team was not found.
    pub fn into_records(self) -> Vec<GameRecord> {
        match self {
            TeamBox::Found(records) => records,
            TeamBox::TeamNotFound => Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types (boxscore endpoint)
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Boxscore {
    pub teams: BoxscoreTeams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BoxscoreTeams {
    pub home: Option<TeamSide>,
    pub away: Option<TeamSide>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamSide {
    pub team: TeamInfo,
    /// Keyed by "ID<player id>", in the order the box score lists them.
    pub players: IndexMap<String, PlayerEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct TeamInfo {
    pub abbreviation: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerEntry {
    pub person: Person,
    #[serde(deserialize_with = "lenient_string")]
    pub batting_order: Option<String>,
    pub position: PositionInfo,
    pub stats: PlayerStats,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
    #[serde(deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    pub full_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PositionInfo {
    pub abbreviation: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub batting: RawBatting,
    pub pitching: RawPitching,
    pub fielding: RawFielding,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawBatting {
    #[serde(deserialize_with = "lenient_count")]
    pub at_bats: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub runs: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub hits: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub rbi: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub base_on_balls: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub strike_outs: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub home_runs: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub ops: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPitching {
    #[serde(deserialize_with = "lenient_string")]
    pub innings_pitched: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub hits: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub runs: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub earned_runs: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub base_on_balls: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub strike_outs: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub home_runs: u32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFielding {
    #[serde(deserialize_with = "lenient_count")]
    pub errors: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub assists: u32,
    #[serde(deserialize_with = "lenient_count")]
    pub put_outs: u32,
}

// ---------------------------------------------------------------------------
// Lenient field decoders
// ---------------------------------------------------------------------------

/// Counting stat: a number, a digit string, or anything else as zero.
fn lenient_count<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(d)?;
    let n = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(n.and_then(|n| u32::try_from(n).ok()).unwrap_or(0))
}

/// Free-form string field; numbers are stringified, null and empty become unset.
fn lenient_string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match value {
        Value::String(s) if !s.is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

// ---------------------------------------------------------------------------
// Extraction
// ---------------------------------------------------------------------------

/// Decode a raw batting-order code ("300", "301") into the lineup slot.
///
/// The hundreds digit is the slot; the rest is the substitution index.
/// Absent, empty, or non-digit codes are unset rather than zero.
pub fn decode_batting_order(raw: Option<&str>) -> Option<u32> {
    let raw = raw?;
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse::<u32>().ok().map(|code| code / 100)
}

fn to_game_record(key: &str, entry: &PlayerEntry) -> Option<GameRecord> {
    let Some(player_id) = entry.person.id else {
        warn!("skipping player entry {key}: missing person id");
        return None;
    };

    let bat = &entry.stats.batting;
    let pit = &entry.stats.pitching;
    let fld = &entry.stats.fielding;

    Some(GameRecord {
        player_id,
        player_name: entry.person.full_name.clone(),
        position: entry.position.abbreviation.clone(),
        batting_order: decode_batting_order(entry.batting_order.as_deref()),
        batting: BattingLine {
            at_bats: bat.at_bats,
            runs: bat.runs,
            hits: bat.hits,
            rbi: bat.rbi,
            walks: bat.base_on_balls,
            strikeouts: bat.strike_outs,
            home_runs: bat.home_runs,
        },
        ops: bat.ops.clone(),
        pitching: PitchingLine {
            hits: pit.hits,
            runs: pit.runs,
            earned_runs: pit.earned_runs,
            walks: pit.base_on_balls,
            strikeouts: pit.strike_outs,
            home_runs: pit.home_runs,
        },
        innings_pitched: pit.innings_pitched.clone(),
        fielding: FieldingLine {
            errors: fld.errors,
            assists: fld.assists,
            put_outs: fld.put_outs,
        },
    })
}

/// Pick the team's side (home first, then away) by abbreviation and flatten
/// its player entries.
pub fn extract_team_box(boxscore: &Boxscore, team: Team) -> TeamBox {
    let sides = [boxscore.teams.home.as_ref(), boxscore.teams.away.as_ref()];
    let side = sides
        .into_iter()
        .flatten()
        .find(|side| side.team.abbreviation.as_deref() == Some(team.abbreviation));

    match side {
        Some(side) => TeamBox::Found(
            side.players
                .iter()
                .filter_map(|(key, entry)| to_game_record(key, entry))
                .collect(),
        ),
        None => TeamBox::TeamNotFound,
    }
}

impl<S: StatsSource> StatsApi<S> {
    /// Fetch one game's box score and extract the team's player lines.
    pub async fn fetch_team_box(&self, team: Team, game_pk: u64) -> Result<TeamBox, FetchError> {
        let url = self.boxscore_url(game_pk);
        let boxscore: Boxscore = self.get(&url).await?;
        let result = extract_team_box(&boxscore, team);
        if result == TeamBox::TeamNotFound {
            warn!("{} not found in game {game_pk}", team.abbreviation);
        }
        Ok(result)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
