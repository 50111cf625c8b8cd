// Season aggregation: fold per-game records into one total per player.

use std::collections::HashMap;

use super::innings;
use super::record::{BattingLine, FieldingLine, GameRecord, PitchingLine, SeasonRecord};

// ---------------------------------------------------------------------------
// Running totals
// ---------------------------------------------------------------------------

/// Running totals for one player. Created fully zeroed on the first record
/// seen for that player id.
#[derive(Debug, Clone)]
struct PlayerTotals {
    player_id: u64,
    // Name, position, and batting order are last-write-wins: every record
    // overwrites them, so the final value is from the last game folded.
    player_name: String,
    position: String,
    batting_order: Option<u32>,
    batting: BattingLine,
    pitching: PitchingLine,
    fielding: FieldingLine,
    innings: f64,
}

impl PlayerTotals {
    fn new(player_id: u64) -> Self {
        Self {
            player_id,
            player_name: String::new(),
            position: String::new(),
            batting_order: None,
            batting: BattingLine::default(),
            pitching: PitchingLine::default(),
            fielding: FieldingLine::default(),
            innings: 0.0,
        }
    }

    fn add(&mut self, record: &GameRecord) {
        self.player_name.clone_from(&record.player_name);
        self.position.clone_from(&record.position);
        self.batting_order = record.batting_order;

        self.batting += record.batting;
        self.pitching += record.pitching;
        self.fielding += record.fielding;

        let ip = innings::decode(record.innings_pitched.as_deref());
        if ip > 0.0 {
            self.innings += ip;
        }
    }

    fn finish(self) -> SeasonRecord {
        let (era, whip) = if self.innings > 0.0 {
            let er = f64::from(self.pitching.earned_runs);
            let baserunners = f64::from(self.pitching.walks + self.pitching.hits);
            (
                Some(round2(9.0 * er / self.innings)),
                Some(round2(baserunners / self.innings)),
            )
        } else {
            (None, None)
        };

        SeasonRecord {
            player_id: self.player_id,
            player_name: self.player_name,
            position: self.position,
            batting_order: self.batting_order,
            at_bats: self.batting.at_bats,
            runs: self.batting.runs,
            hits: self.batting.hits,
            rbi: self.batting.rbi,
            walks: self.batting.walks,
            strikeouts: self.batting.strikeouts,
            home_runs: self.batting.home_runs,
            innings_pitched: innings::encode(self.innings),
            hits_allowed: self.pitching.hits,
            runs_allowed: self.pitching.runs,
            earned_runs: self.pitching.earned_runs,
            walks_allowed: self.pitching.walks,
            strikeouts_pitched: self.pitching.strikeouts,
            home_runs_allowed: self.pitching.home_runs,
            era,
            whip,
            errors: self.fielding.errors,
            assists: self.fielding.assists,
            put_outs: self.fielding.put_outs,
            innings_total: self.innings,
        }
    }
}

/// Round to two decimals, sending exact half-cent ties to the even digit
/// (1.125 → 1.12). Values stored just off a tie, like 2.675, round by
/// their true binary value (2.67).
fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    // Rounding error of the multiplication, exact via fused multiply-add.
    let error = value.mul_add(100.0, -scaled);
    let frac = scaled - scaled.trunc();
    let rounded = if frac.abs() != 0.5 {
        scaled.round()
    } else if error == 0.0 {
        scaled.round_ties_even()
    } else if error > 0.0 {
        // True value sits just above the apparent tie.
        scaled.ceil()
    } else {
        scaled.floor()
    };
    rounded / 100.0
}

// ---------------------------------------------------------------------------
// Aggregator
// ---------------------------------------------------------------------------

/// Accumulates game records into season totals, keeping players in the order
/// their ids were first seen.
#[derive(Debug, Default)]
pub struct SeasonAggregator {
    index: HashMap<u64, usize>,
    players: Vec<PlayerTotals>,
}

impl SeasonAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a single game record into the running totals.
    pub fn add(&mut self, record: &GameRecord) {
        let slot = match self.index.get(&record.player_id) {
            Some(&slot) => slot,
            None => {
                self.players.push(PlayerTotals::new(record.player_id));
                let slot = self.players.len() - 1;
                self.index.insert(record.player_id, slot);
                slot
            }
        };
        self.players[slot].add(record);
    }

    pub fn extend<'a>(&mut self, records: impl IntoIterator<Item = &'a GameRecord>) {
        for record in records {
            self.add(record);
        }
    }

    /// Number of distinct players seen so far.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Compute rate stats and re-encode innings for every player.
    pub fn finish(self) -> Vec<SeasonRecord> {
        self.players.into_iter().map(PlayerTotals::finish).collect()
    }
}

/// Aggregate a complete set of game records in one call.
pub fn aggregate(records: &[GameRecord]) -> Vec<SeasonRecord> {
    let mut agg = SeasonAggregator::new();
    agg.extend(records);
    agg.finish()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn pitcher_game(ab: u32, h: u32, ip: &str, er: u32, bb: u32, h_pit: u32) -> GameRecord {
        let mut r = GameRecord::new(500, "J. Doe");
        r.position = "P".into();
        r.batting.at_bats = ab;
        r.batting.hits = h;
        r.innings_pitched = Some(ip.into());
        r.pitching.earned_runs = er;
        r.pitching.walks = bb;
        r.pitching.hits = h_pit;
        r
    }

    #[test]
    fn two_game_pitcher_season() {
        let records = vec![
            pitcher_game(4, 2, "1.2", 1, 1, 2),
            pitcher_game(3, 1, "2.0", 0, 0, 0),
        ];
        let season = aggregate(&records);
        assert_eq!(season.len(), 1);

        let doe = &season[0];
        assert_eq!(doe.player_id, 500);
        assert_eq!(doe.at_bats, 7);
        assert_eq!(doe.hits, 3);
        assert!((doe.innings_total - (1.0 + 2.0 / 3.0 + 2.0)).abs() < 1e-9);
        assert_eq!(doe.innings_pitched, "3.2");
        assert_eq!(doe.era, Some(2.45));
        assert_eq!(doe.whip, Some(0.82));
    }

    #[test]
    fn half_cent_rates_round_to_even() {
        // 1 ER and 9 baserunners over 8 innings: ERA and WHIP are both 1.125.
        let season = aggregate(&[pitcher_game(0, 0, "8.0", 1, 4, 5)]);
        assert_eq!(season[0].era, Some(1.12));
        assert_eq!(season[0].whip, Some(1.12));

        // 3 ER over 8 innings is 3.375, which rounds up to the even 3.38.
        let season = aggregate(&[pitcher_game(0, 0, "8.0", 3, 0, 0)]);
        assert_eq!(season[0].era, Some(3.38));
    }

    #[test]
    fn round2_behaviour() {
        assert_eq!(round2(1.125), 1.12);
        assert_eq!(round2(1.375), 1.38);
        assert_eq!(round2(0.125), 0.12);
        assert_eq!(round2(2.4545), 2.45);
        assert_eq!(round2(0.818), 0.82);
        // 2.675 is stored just below the tie and rounds down.
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn non_pitchers_have_blank_rates_and_zero_ip() {
        let mut r = GameRecord::new(7, "Position Player");
        r.batting.at_bats = 4;
        r.batting.hits = 1;
        let season = aggregate(&[r.clone(), r]);
        assert_eq!(season[0].at_bats, 8);
        assert_eq!(season[0].innings_pitched, "0");
        assert_eq!(season[0].era, None);
        assert_eq!(season[0].whip, None);
    }

    #[test]
    fn malformed_or_zero_ip_contributes_nothing() {
        let mut a = GameRecord::new(9, "Mop Up");
        a.innings_pitched = Some("abc".into());
        a.pitching.earned_runs = 3;
        let mut b = GameRecord::new(9, "Mop Up");
        b.innings_pitched = Some("0.0".into());
        let season = aggregate(&[a, b]);
        assert_eq!(season[0].innings_total, 0.0);
        assert_eq!(season[0].earned_runs, 3);
        assert_eq!(season[0].era, None);
        assert_eq!(season[0].innings_pitched, "0");
    }

    #[test]
    fn counting_totals_do_not_depend_on_fold_order() {
        let mut a = GameRecord::new(1, "A");
        a.batting.runs = 2;
        a.pitching.strikeouts = 5;
        a.fielding.assists = 3;
        a.innings_pitched = Some("4.1".into());
        let mut b = GameRecord::new(1, "A");
        b.batting.runs = 1;
        b.pitching.strikeouts = 2;
        b.fielding.put_outs = 4;
        b.innings_pitched = Some("2.2".into());

        let forward = aggregate(&[a.clone(), b.clone()]);
        let backward = aggregate(&[b, a]);
        assert_eq!(forward[0].runs, 3);
        assert_eq!(forward[0].strikeouts_pitched, 7);
        assert_eq!(forward[0].assists, 3);
        assert_eq!(forward[0].put_outs, 4);
        assert_eq!(forward[0].innings_pitched, "7");
        assert_eq!(forward[0].runs, backward[0].runs);
        assert_eq!(forward[0].strikeouts_pitched, backward[0].strikeouts_pitched);
        assert_eq!(forward[0].innings_pitched, backward[0].innings_pitched);
        assert_eq!(forward[0].era, backward[0].era);
    }

    #[test]
    fn metadata_is_last_write_wins() {
        let mut first = GameRecord::new(22, "Old Name");
        first.position = "SS".into();
        first.batting_order = Some(2);
        let mut last = GameRecord::new(22, "New Name");
        last.position = "2B".into();
        last.batting_order = None;

        let season = aggregate(&[first, last]);
        assert_eq!(season[0].player_name, "New Name");
        assert_eq!(season[0].position, "2B");
        assert_eq!(season[0].batting_order, None);
    }

    #[test]
    fn one_row_per_player_in_first_seen_order() {
        let records = vec![
            GameRecord::new(30, "C"),
            GameRecord::new(10, "A"),
            GameRecord::new(30, "C"),
            GameRecord::new(20, "B"),
            GameRecord::new(10, "A"),
        ];
        let mut agg = SeasonAggregator::new();
        agg.extend(&records);
        assert_eq!(agg.len(), 3);
        let ids: Vec<u64> = agg.finish().iter().map(|r| r.player_id).collect();
        assert_eq!(ids, vec![30, 10, 20]);
    }

    #[test]
    fn empty_input_yields_no_rows() {
        let agg = SeasonAggregator::new();
        assert!(agg.is_empty());
        assert!(agg.finish().is_empty());
    }
}
