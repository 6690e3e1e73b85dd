//! Fixed-width console tables.

use super::truncate_name;
use crate::aggregate::{AggregateStore, OpponentRecord};
use crate::query::{subtypes_of, summary_for, BucketSelector, BucketSummary, Matchup, ALL_LABEL};
use anyhow::Result;
use std::fmt::Write;

const TABLE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 24;

/// Head-to-head table for one bucket, with an OVERALL footer.
///
/// `top_n` limits the opponent rows; the footer always covers the whole bucket.
pub fn render_bucket_table(
    summary: &BucketSummary,
    player_name: &str,
    top_n: Option<usize>,
) -> Result<String> {
    let mut out = String::new();

    if summary.opponents.is_empty() {
        writeln!(out, "No head-to-head data found for {}!", summary.label)?;
        return Ok(out);
    }

    let scope = if summary.label == ALL_LABEL {
        "ALL TOURNAMENTS".to_string()
    } else {
        summary.label.to_uppercase()
    };

    writeln!(out, "\n{:=<width$}", "", width = TABLE_WIDTH)?;
    writeln!(
        out,
        "HEAD-TO-HEAD STATISTICS FOR {} - {}",
        player_name.to_uppercase(),
        scope
    )?;
    writeln!(out, "{:=<width$}", "", width = TABLE_WIDTH)?;
    writeln!(
        out,
        "{:<25} {:<6} {:<8} {:<8} {:<8}",
        "OPPONENT", "WINS", "LOSSES", "TOTAL", "WIN %"
    )?;
    writeln!(out, "{:-<width$}", "", width = TABLE_WIDTH)?;

    let rows = match top_n {
        Some(n) => summary.top(n),
        None => &summary.opponents[..],
    };
    for line in rows {
        write_row(&mut out, &truncate_name(&line.name, NAME_WIDTH), &line.record)?;
    }

    writeln!(out, "{:-<width$}", "", width = TABLE_WIDTH)?;
    let overall = OpponentRecord {
        wins: summary.total_wins,
        losses: summary.total_losses,
        total_matches: summary.total_matches,
    };
    write_row(&mut out, "OVERALL", &overall)?;
    writeln!(out, "{:=<width$}", "", width = TABLE_WIDTH)?;

    Ok(out)
}

fn write_row(out: &mut String, name: &str, record: &OpponentRecord) -> Result<()> {
    writeln!(
        out,
        "{:<25} {:<6} {:<8} {:<8} {:<7.1}%",
        name,
        record.wins,
        record.losses,
        record.total_matches,
        record.win_percentage()
    )?;
    Ok(())
}

/// Block describing a best/toughest pick, e.g. "BEST MATCHUP: A".
pub fn render_matchup(heading: &str, matchup: Option<&Matchup>, min_matches: u32) -> String {
    match matchup {
        Some(m) => format!(
            "\n{}: {}\n   Win Rate: {:.1}% ({} wins out of {} matches)\n",
            heading,
            m.name,
            m.win_rate * 100.0,
            m.record.wins,
            m.record.total_matches
        ),
        None => format!(
            "\n{}: none found (minimum {} matches)\n",
            heading, min_matches
        ),
    }
}

/// One line per sub type of `main_type` that has matches.
pub fn render_subtypes(store: &AggregateStore, main_type: &str) -> Result<String> {
    let subtypes = subtypes_of(store, main_type);
    let mut out = String::new();
    writeln!(out, "\n{} Subtypes ({}):", main_type, subtypes.len())?;
    for label in subtypes {
        let summary = summary_for(store, &BucketSelector::SubType(label.clone()));
        if summary.total_matches > 0 {
            writeln!(
                out,
                "   {}: {} matches, {:.1}% win rate",
                label, summary.total_matches, summary.win_percentage
            )?;
        }
    }
    Ok(out)
}

/// Detailed record against a single opponent.
pub fn render_opponent_detail(name: &str, record: Option<&OpponentRecord>) -> Result<String> {
    let Some(record) = record else {
        return Ok(format!("No data found for opponent: {}\n", name));
    };
    let mut out = String::new();
    writeln!(out, "\nDETAILED STATS vs {}:", name)?;
    writeln!(out, "   Wins: {}", record.wins)?;
    writeln!(out, "   Losses: {}", record.losses)?;
    writeln!(out, "   Total Matches: {}", record.total_matches)?;
    if record.total_matches > 0 {
        writeln!(out, "   Win Rate: {:.1}%", record.win_percentage())?;
    }
    Ok(out)
}
