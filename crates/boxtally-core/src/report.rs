// Season totals CSV writer.

use std::io::Write;
use std::path::Path;

use crate::stats::SeasonRecord;

/// Output header, in column order. Must line up with `SeasonRecord`'s
/// serialized fields.
pub const COLUMNS: [&str; 23] = [
    "player_id",
    "player_name",
    "position",
    "batting_order",
    "AB",
    "R",
    "H",
    "RBI",
    "BB",
    "SO",
    "HR",
    "IP",
    "H_pit",
    "R_pit",
    "ER",
    "BB_pit",
    "SO_pit",
    "HR_pit",
    "ERA",
    "WHIP",
    "errors",
    "assists",
    "putOuts",
];

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error writing {path}: {source}")]
    Csv { path: String, source: csv::Error },
}

/// Write the header and one row per record to `writer`, in the given order.
///
/// The header is always written, even for an empty season.
pub fn write_records<W: Write>(writer: W, records: &[SeasonRecord]) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    wtr.write_record(COLUMNS)?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create (or truncate) `path` and write the report to it.
pub fn write_report(path: &Path, records: &[SeasonRecord]) -> Result<(), ReportError> {
    let file = std::fs::File::create(path).map_err(|e| ReportError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    write_records(file, records).map_err(|e| ReportError::Csv {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::{aggregate, GameRecord};

    fn render(records: &[SeasonRecord]) -> String {
        let mut buf = Vec::new();
        write_records(&mut buf, records).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn empty_season_still_has_header() {
        let out = render(&[]);
        assert_eq!(out.lines().count(), 1);
        assert_eq!(out.lines().next().unwrap(), COLUMNS.join(","));
    }

    #[test]
    fn pitcher_row_matches_columns() {
        let mut a = GameRecord::new(500, "J. Doe");
        a.position = "P".into();
        a.batting.at_bats = 4;
        a.batting.hits = 2;
        a.innings_pitched = Some("1.2".into());
        a.pitching.earned_runs = 1;
        a.pitching.walks = 1;
        a.pitching.hits = 2;
        let mut b = GameRecord::new(500, "J. Doe");
        b.position = "P".into();
        b.batting.at_bats = 3;
        b.batting.hits = 1;
        b.innings_pitched = Some("2.0".into());

        let out = render(&aggregate(&[a, b]));
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(
            rows[1],
            "500,J. Doe,P,,7,0,3,0,0,0,0,3.2,2,0,1,1,0,0,2.45,0.82,0,0,0"
        );
    }

    #[test]
    fn hitter_row_has_blank_rates_and_zero_ip() {
        let mut r = GameRecord::new(600, "Leadoff Guy");
        r.position = "SS".into();
        r.batting_order = Some(1);
        r.batting.at_bats = 4;
        r.fielding.put_outs = 2;

        let out = render(&aggregate(&[r]));
        let row = out.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(',').collect();
        assert_eq!(fields.len(), COLUMNS.len());
        assert_eq!(fields[3], "1");
        assert_eq!(fields[11], "0");
        assert_eq!(fields[18], "");
        assert_eq!(fields[19], "");
        assert_eq!(fields[22], "2");
    }

    #[test]
    fn names_with_commas_are_quoted() {
        let r = GameRecord::new(1, "Acuña, Ronald");
        let out = render(&aggregate(&[r]));
        assert!(out.lines().nth(1).unwrap().starts_with("1,\"Acuña, Ronald\","));
    }

    #[test]
    fn write_report_creates_file() {
        let path = std::env::temp_dir()
            .join(format!("boxtally_report_test_{}.csv", std::process::id()));
        let _ = std::fs::remove_file(&path);
        write_report(&path, &aggregate(&[GameRecord::new(3, "Someone")])).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn unwritable_destination_is_io_error() {
        let path = std::env::temp_dir()
            .join(format!("boxtally_no_such_dir_{}", std::process::id()))
            .join("nested")
            .join("out.csv");
        let err = write_report(&path, &[]).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
