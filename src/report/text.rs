//! Plain-text detailed report.

use super::{truncate_name, ReportHeader};
use crate::aggregate::AggregateStore;
use crate::query::{summary_for, BucketSelector, BucketSummary};
use crate::tournament::STANDARD_MAIN_TYPES;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

const NAME_WIDTH: usize = 29;

/// Overall summary, per main type summaries and the full opponent breakdown.
pub fn render_detailed_report(store: &AggregateStore, header: &ReportHeader) -> Result<String> {
    let mut out = String::new();
    let all = summary_for(store, &BucketSelector::All);

    writeln!(out, "{:=<80}", "")?;
    writeln!(
        out,
        "CRICKET HEAD-TO-HEAD DETAILED REPORT - {}",
        header.player_name.to_uppercase()
    )?;
    writeln!(out, "{:=<80}", "")?;
    writeln!(out, "Generated: {}", header.generated_long())?;
    writeln!(out, "{:=<80}", "")?;
    writeln!(out)?;

    writeln!(out, "OVERALL SUMMARY")?;
    writeln!(out, "{:-<40}", "")?;
    writeln!(out, "Total Matches: {}", all.total_matches)?;
    writeln!(out, "Total Wins: {}", all.total_wins)?;
    writeln!(out, "Total Losses: {}", all.total_losses)?;
    writeln!(out, "Overall Win Rate: {:.1}%", all.win_percentage)?;
    writeln!(out, "Unique Opponents: {}", all.opponents_count())?;
    writeln!(out)?;

    for main_type in STANDARD_MAIN_TYPES {
        let summary = summary_for(store, &BucketSelector::MainType(main_type.to_string()));
        if !summary.is_empty() {
            write_type_summary(&mut out, &summary)?;
        }
    }

    writeln!(out, "DETAILED OPPONENT BREAKDOWN (ALL TOURNAMENTS)")?;
    writeln!(out, "{:-<60}", "")?;
    writeln!(
        out,
        "{:<30} {:<5} {:<5} {:<7} {:<8}",
        "Opponent", "W", "L", "Total", "Win%"
    )?;
    writeln!(out, "{:-<60}", "")?;
    for line in &all.opponents {
        writeln!(
            out,
            "{:<30} {:<5} {:<5} {:<7} {:<7.1}%",
            truncate_name(&line.name, NAME_WIDTH),
            line.record.wins,
            line.record.losses,
            line.record.total_matches,
            line.record.win_percentage()
        )?;
    }

    Ok(out)
}

fn write_type_summary(out: &mut String, summary: &BucketSummary) -> Result<()> {
    writeln!(out, "{} SUMMARY", summary.label.to_uppercase())?;
    writeln!(out, "{:-<40}", "")?;
    writeln!(out, "Matches: {}", summary.total_matches)?;
    writeln!(out, "Wins: {}", summary.total_wins)?;
    writeln!(out, "Losses: {}", summary.total_losses)?;
    writeln!(out, "Win Rate: {:.1}%", summary.win_percentage)?;
    writeln!(out, "Opponents: {}", summary.opponents_count())?;
    writeln!(out)?;
    Ok(())
}

/// Write the detailed report to `path`.
pub fn write_detailed_report(
    store: &AggregateStore,
    header: &ReportHeader,
    path: &Path,
) -> Result<()> {
    std::fs::write(path, render_detailed_report(store, header)?)
        .with_context(|| format!("Failed to write detailed report {}", path.display()))?;
    log::info!("Detailed report written to: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::matches::MatchRecord;
    use chrono::NaiveDate;
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
    fn test_detailed_report() {
        let store = aggregate(
            &[
                duel("iBC PRO 360 - 500", "WIN", "A"),
                duel("iBC PRO 360 - 1000", "LOSS", "A"),
                duel("Weekly Cup", "WIN", "An opponent with a very long display name"),
            ],
            "P1",
        );
        let at = NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(18, 0, 0)
            .unwrap();
        let text = render_detailed_report(&store, &ReportHeader::new("Test Player", at)).unwrap();

        assert!(text.contains("DETAILED REPORT - TEST PLAYER"));
        assert!(text.contains("Total Matches: 3"));
        assert!(text.contains("Overall Win Rate: 66.7%"));
        assert!(text.contains("Unique Opponents: 2"));
        assert!(text.contains("IBC PRO 360 SUMMARY"));
        assert!(text.contains("OTHER SUMMARY"));
        assert!(!text.contains("IBC 360 SUMMARY"));
        assert!(text.contains("A                              1     1     2       50.0   %"));
        assert!(text.contains("An opponent with a very long   1     0     1       100.0  %"));
    }
}
