// Per-game and per-season player stat lines.

use std::ops::AddAssign;

use serde::Serialize;

/// Batting counting stats for one game (or summed over many).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattingLine {
    pub at_bats: u32,
    pub runs: u32,
    pub hits: u32,
    pub rbi: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs: u32,
}

/// Pitching counting stats. Innings pitched live outside this struct because
/// they are not plain counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PitchingLine {
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub walks: u32,
    pub strikeouts: u32,
    pub home_runs: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldingLine {
    pub errors: u32,
    pub assists: u32,
    pub put_outs: u32,
}

impl AddAssign for BattingLine {
    fn add_assign(&mut self, rhs: Self) {
        self.at_bats += rhs.at_bats;
        self.runs += rhs.runs;
        self.hits += rhs.hits;
        self.rbi += rhs.rbi;
        self.walks += rhs.walks;
        self.strikeouts += rhs.strikeouts;
        self.home_runs += rhs.home_runs;
    }
}

impl AddAssign for PitchingLine {
    fn add_assign(&mut self, rhs: Self) {
        self.hits += rhs.hits;
        self.runs += rhs.runs;
        self.earned_runs += rhs.earned_runs;
        self.walks += rhs.walks;
        self.strikeouts += rhs.strikeouts;
        self.home_runs += rhs.home_runs;
    }
}

impl AddAssign for FieldingLine {
    fn add_assign(&mut self, rhs: Self) {
        self.errors += rhs.errors;
        self.assists += rhs.assists;
        self.put_outs += rhs.put_outs;
    }
}

/// One player's line from a single game's box score.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub player_id: u64,
    pub player_name: String,
    pub position: String,
    /// Lineup slot 1-9, or `None` when the player had no batting-order code.
    pub batting_order: Option<u32>,
    pub batting: BattingLine,
    /// Batting OPS as reported by the box score. Carried but not aggregated.
    pub ops: Option<String>,
    pub pitching: PitchingLine,
    /// Innings pitched in box-score notation ("6.1"), `None` if absent.
    pub innings_pitched: Option<String>,
    pub fielding: FieldingLine,
}

impl GameRecord {
    /// A record with every stat zeroed and every optional field unset.
    pub fn new(player_id: u64, player_name: impl Into<String>) -> Self {
        Self {
            player_id,
            player_name: player_name.into(),
            position: String::new(),
            batting_order: None,
            batting: BattingLine::default(),
            ops: None,
            pitching: PitchingLine::default(),
            innings_pitched: None,
            fielding: FieldingLine::default(),
        }
    }
}

/// A finalized season total for one player, in output column order.
///
/// Field names map onto the report header via `serde(rename)`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRecord {
    pub player_id: u64,
    pub player_name: String,
    pub position: String,
    pub batting_order: Option<u32>,
    #[serde(rename = "AB")]
    pub at_bats: u32,
    #[serde(rename = "R")]
    pub runs: u32,
    #[serde(rename = "H")]
    pub hits: u32,
    #[serde(rename = "RBI")]
    pub rbi: u32,
    #[serde(rename = "BB")]
    pub walks: u32,
    #[serde(rename = "SO")]
    pub strikeouts: u32,
    #[serde(rename = "HR")]
    pub home_runs: u32,
    #[serde(rename = "IP")]
    pub innings_pitched: String,
    #[serde(rename = "H_pit")]
    pub hits_allowed: u32,
    #[serde(rename = "R_pit")]
    pub runs_allowed: u32,
    #[serde(rename = "ER")]
    pub earned_runs: u32,
    #[serde(rename = "BB_pit")]
    pub walks_allowed: u32,
    #[serde(rename = "SO_pit")]
    pub strikeouts_pitched: u32,
    #[serde(rename = "HR_pit")]
    pub home_runs_allowed: u32,
    #[serde(rename = "ERA")]
    pub era: Option<f64>,
    #[serde(rename = "WHIP")]
    pub whip: Option<f64>,
    pub errors: u32,
    pub assists: u32,
    #[serde(rename = "putOuts")]
    pub put_outs: u32,
    /// True summed innings. Used for the rate stats, never written out.
    #[serde(skip)]
    pub innings_total: f64,
}
