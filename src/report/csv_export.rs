//! CSV export of every bucket's opponent records.

use crate::aggregate::{AggregateStore, Bucket};
use crate::query::ALL_LABEL;
use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 6] = [
    "Tournament_Type",
    "Opponent",
    "Wins",
    "Losses",
    "Total_Matches",
    "Win_Percentage",
];

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Tournament_Type")]
    tournament_type: &'a str,
    #[serde(rename = "Opponent")]
    opponent: &'a str,
    #[serde(rename = "Wins")]
    wins: u32,
    #[serde(rename = "Losses")]
    losses: u32,
    #[serde(rename = "Total_Matches")]
    total_matches: u32,
    #[serde(rename = "Win_Percentage")]
    win_percentage: String,
}

/// Write rows for the global bucket ("All"), then every main type bucket,
/// then every sub type bucket. The header row is written even when no match
/// was counted.
pub fn write_csv<W: Write>(store: &AggregateStore, out: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    writer.write_record(HEADERS)?;

    write_bucket(&mut writer, ALL_LABEL, store.global())?;
    for (label, bucket) in store.main_types() {
        write_bucket(&mut writer, label, bucket)?;
    }
    for (label, bucket) in store.sub_types() {
        write_bucket(&mut writer, label, bucket)?;
    }

    writer.flush()?;
    Ok(())
}

fn write_bucket<W: Write>(
    writer: &mut csv::Writer<W>,
    label: &str,
    bucket: &Bucket,
) -> Result<()> {
    for (opponent, record) in bucket.iter() {
        writer.serialize(CsvRow {
            tournament_type: label,
            opponent,
            wins: record.wins,
            losses: record.losses,
            total_matches: record.total_matches,
            win_percentage: format!("{:.1}", record.win_percentage()),
        })?;
    }
    Ok(())
}

/// Write the CSV report to `path`.
pub fn write_csv_file(store: &AggregateStore, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create CSV report {}", path.display()))?;
    write_csv(store, file)?;
    log::info!("CSV report written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::matches::MatchRecord;
    use serde_json::json;

    fn duel(tournament: &str, result: &str, opponent: &str) -> MatchRecord {
        MatchRecord::from_value(json!({
            "status": "COMPLETED",
            "match_mode": "DUAL_PLAYER",
            "tournament_name": tournament,
            "match_user_details": { "users": [
                { "user_id": "P1", "name": "Me", "result": result },
                { "user_id": "X", "name": opponent },
            ]},
        }))
    }

    #[test]
    fn test_csv_rows() {
        let store = aggregate(
            &[
                duel("iBC 360 - 250 Blitz", "WIN", "A"),
                duel("Weekly, Cup", "LOSS", "B"),
                duel("iBC 360 - 250", "DRAW", "A"),
            ],
            "P1",
        );
        let mut buf = Vec::new();
        write_csv(&store, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines,
            vec![
                "Tournament_Type,Opponent,Wins,Losses,Total_Matches,Win_Percentage",
                "All,A,1,0,2,50.0",
                "All,B,0,1,1,0.0",
                "iBC 360,A,1,0,2,50.0",
                "Other,B,0,1,1,0.0",
                "iBC 360 - 250,A,1,0,2,50.0",
                "\"Weekly, Cup\",B,0,1,1,0.0",
            ]
        );
    }

    #[test]
    fn test_csv_header_without_counted_matches() {
        let unfinished = MatchRecord::from_value(json!({
            "status": "IN_PROGRESS",
            "match_mode": "DUAL_PLAYER",
            "tournament_name": "iBC 360 - 250",
            "match_user_details": { "users": [
                { "user_id": "P1", "name": "Me", "result": "WIN" },
                { "user_id": "X", "name": "A" },
            ]},
        }));
        let store = aggregate(&[unfinished], "P1");
        assert!(store.global().is_empty());

        let mut buf = Vec::new();
        write_csv(&store, &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "Tournament_Type,Opponent,Wins,Losses,Total_Matches,Win_Percentage\n"
        );
    }

    #[test]
    fn test_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        let store = aggregate(&[duel("x", "WIN", "A")], "P1");

        write_csv_file(&store, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("Tournament_Type,Opponent"));
        assert!(text.contains("All,A,1,0,1,100.0"));
    }

    #[test]
    fn test_csv_file_in_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("report.csv");
        let store = aggregate(&[duel("x", "WIN", "A")], "P1");
        assert!(write_csv_file(&store, &path).is_err());
    }
}
