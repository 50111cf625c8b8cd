// Stat lines, innings-pitched notation, and season aggregation.

pub mod innings;
pub mod record;
pub mod season;

pub use record::{BattingLine, FieldingLine, GameRecord, PitchingLine, SeasonRecord};
pub use season::{aggregate, SeasonAggregator};
