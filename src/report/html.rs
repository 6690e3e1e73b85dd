//! Self-contained HTML report with one tab per tournament main type.

use super::ReportHeader;
use crate::aggregate::AggregateStore;
use crate::query::{subtypes_of, summary_for, BucketSelector, BucketSummary};
use crate::tournament::STANDARD_MAIN_TYPES;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Arial, sans-serif;
            margin: 0;
            padding: 24px;
            background: #0f172a;
            color: #e2e8f0;
        }
        .container { max-width: 1200px; margin: 0 auto; }
        .header { text-align: center; margin-bottom: 32px; }
        .header h1 { color: #f97316; margin-bottom: 8px; }
        .header .generated { color: #94a3b8; font-size: 0.9em; }
        .player-avatar { display: inline-flex; margin-bottom: 12px; }
        .summary-cards {
            display: grid;
            grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
            gap: 16px;
            margin-bottom: 28px;
        }
        .card {
            background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
            padding: 18px;
            border-radius: 10px;
            text-align: center;
        }
        .card h3 { margin: 0 0 8px 0; font-size: 1em; font-weight: 600; }
        .card .value { font-size: 2em; font-weight: bold; }
        .filter-tabs { display: flex; flex-wrap: wrap; gap: 6px; border-bottom: 2px solid #f97316; margin-bottom: 20px; }
        .filter-tab {
            padding: 10px 20px;
            background: #1e293b;
            color: #e2e8f0;
            border: none;
            border-radius: 6px 6px 0 0;
            cursor: pointer;
        }
        .filter-tab.active { background: #f97316; color: #fff; }
        .content-section { display: none; }
        .content-section.active { display: block; }
        .tournament-section {
            background: #1e293b;
            border-left: 4px solid #f97316;
            border-radius: 8px;
            padding: 20px;
        }
        .tournament-section h2 { margin-top: 0; }
        .subtype-list { display: flex; flex-wrap: wrap; gap: 10px; margin: 0 0 20px 0; padding: 0; list-style: none; }
        .subtype-list li { background: #334155; border-radius: 6px; padding: 8px 12px; font-size: 0.9em; }
        table.data-table { width: 100%; border-collapse: collapse; }
        .data-table th, .data-table td { padding: 10px 12px; text-align: left; border-bottom: 1px solid #334155; }
        .data-table th { background: #334155; }
        .data-table tr:hover { background: #273549; }
        .player-matchup { display: flex; align-items: center; gap: 8px; }
        .vs-indicator { font-size: 0.75em; color: #94a3b8; font-weight: bold; }
        .avatar, .avatar-fallback {
            width: 36px;
            height: 36px;
            border-radius: 50%;
            object-fit: cover;
        }
        .avatar-fallback {
            display: flex;
            align-items: center;
            justify-content: center;
            background: #6366f1;
            font-weight: bold;
        }
        .win-rate-badge { padding: 4px 10px; border-radius: 999px; font-weight: bold; }
        .win-rate-high { background: #166534; color: #bbf7d0; }
        .win-rate-medium { background: #854d0e; color: #fef08a; }
        .win-rate-low { background: #991b1b; color: #fecaca; }
        .empty-state { text-align: center; padding: 40px; color: #94a3b8; }
"#;

const SCRIPT: &str = r#"
        function showSection(sectionId, tab) {
            document.querySelectorAll('.content-section').forEach(function (section) {
                section.classList.remove('active');
            });
            document.getElementById(sectionId).classList.add('active');
            document.querySelectorAll('.filter-tab').forEach(function (t) {
                t.classList.remove('active');
            });
            tab.classList.add('active');
        }
"#;

const ALL_SECTION_ID: &str = "all-tournaments";

/// Render the full report document.
pub fn render_html(store: &AggregateStore, header: &ReportHeader) -> Result<String> {
    let player = escape_html(&header.player_name);
    let all = summary_for(store, &BucketSelector::All);
    let main_types: Vec<&str> = STANDARD_MAIN_TYPES
        .iter()
        .copied()
        .filter(|t| store.tournament_types().contains(*t))
        .collect();

    let mut out = String::new();
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "    <meta charset=\"UTF-8\">")?;
    writeln!(
        out,
        "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
    )?;
    writeln!(out, "    <title>Cricket Head-to-Head Report - {}</title>", player)?;
    writeln!(out, "    <style>{}    </style>", STYLE)?;
    writeln!(out, "    <script>{}    </script>", SCRIPT)?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<div class=\"container\">")?;

    writeln!(out, "    <div class=\"header\">")?;
    writeln!(
        out,
        "        <div class=\"player-avatar\">{}</div>",
        avatar(store.player_avatar(), &header.player_name)
    )?;
    writeln!(out, "        <h1>Cricket Head-to-Head Analysis</h1>")?;
    writeln!(out, "        <h2>{}</h2>", player)?;
    writeln!(
        out,
        "        <p class=\"generated\">Generated on: {}</p>",
        header.generated_long()
    )?;
    writeln!(out, "    </div>")?;

    out.push_str(&summary_cards(&all, true)?);

    writeln!(out, "    <div class=\"filter-tabs\">")?;
    writeln!(
        out,
        "        <button class=\"filter-tab active\" onclick=\"showSection('{}', this)\">All Tournaments</button>",
        ALL_SECTION_ID
    )?;
    for main_type in &main_types {
        writeln!(
            out,
            "        <button class=\"filter-tab\" onclick=\"showSection('{}', this)\">{}</button>",
            section_id(main_type),
            escape_html(main_type)
        )?;
    }
    writeln!(out, "    </div>")?;

    writeln!(
        out,
        "    <div id=\"{}\" class=\"content-section active\">",
        ALL_SECTION_ID
    )?;
    writeln!(out, "        <div class=\"tournament-section\">")?;
    writeln!(out, "            <h2>All Tournaments - Head-to-Head Statistics</h2>")?;
    out.push_str(&opponent_table(store, &all, header)?);
    writeln!(out, "        </div>")?;
    writeln!(out, "    </div>")?;

    for main_type in &main_types {
        let summary = summary_for(store, &BucketSelector::MainType(main_type.to_string()));
        writeln!(
            out,
            "    <div id=\"{}\" class=\"content-section\">",
            section_id(main_type)
        )?;
        writeln!(out, "        <div class=\"tournament-section\">")?;
        writeln!(
            out,
            "            <h2>{} Tournament Analysis</h2>",
            escape_html(main_type)
        )?;
        out.push_str(&summary_cards(&summary, false)?);
        out.push_str(&subtype_list(store, main_type)?);
        out.push_str(&opponent_table(store, &summary, header)?);
        writeln!(out, "        </div>")?;
        writeln!(out, "    </div>")?;
    }

    writeln!(out, "</div>")?;
    writeln!(out, "</body>")?;
    writeln!(out, "</html>")?;
    Ok(out)
}

/// Write the HTML report to `path`.
pub fn write_html_file(store: &AggregateStore, header: &ReportHeader, path: &Path) -> Result<()> {
    std::fs::write(path, render_html(store, header)?)
        .with_context(|| format!("Failed to write HTML report {}", path.display()))?;
    log::info!("HTML report written to: {}", path.display());
    Ok(())
}

fn summary_cards(summary: &BucketSummary, with_losses: bool) -> Result<String> {
    let mut cards = vec![
        ("Total Matches", summary.total_matches.to_string()),
        ("Wins", summary.total_wins.to_string()),
    ];
    if with_losses {
        cards.push(("Losses", summary.total_losses.to_string()));
    }
    cards.push(("Win Rate", format!("{:.1}%", summary.win_percentage)));

    let mut out = String::new();
    writeln!(out, "    <div class=\"summary-cards\">")?;
    for (title, value) in cards {
        writeln!(
            out,
            "        <div class=\"card\"><h3>{}</h3><div class=\"value\">{}</div></div>",
            title, value
        )?;
    }
    writeln!(out, "    </div>")?;
    Ok(out)
}

fn subtype_list(store: &AggregateStore, main_type: &str) -> Result<String> {
    let mut out = String::new();
    let items: Vec<BucketSummary> = subtypes_of(store, main_type)
        .into_iter()
        .map(|label| summary_for(store, &BucketSelector::SubType(label)))
        .filter(|s| !s.is_empty())
        .collect();
    if items.is_empty() {
        return Ok(out);
    }

    writeln!(out, "            <ul class=\"subtype-list\">")?;
    for s in items {
        writeln!(
            out,
            "                <li>{}: {} matches, {:.1}% win rate</li>",
            escape_html(&s.label),
            s.total_matches,
            s.win_percentage
        )?;
    }
    writeln!(out, "            </ul>")?;
    Ok(out)
}

fn opponent_table(
    store: &AggregateStore,
    summary: &BucketSummary,
    header: &ReportHeader,
) -> Result<String> {
    let mut out = String::new();
    if summary.opponents.is_empty() {
        writeln!(out, "            <div class=\"empty-state\">")?;
        writeln!(out, "                <h3>No Match Data Available</h3>")?;
        writeln!(
            out,
            "                <p>No matches found for this tournament category.</p>"
        )?;
        writeln!(out, "            </div>")?;
        return Ok(out);
    }

    let player_avatar = avatar(store.player_avatar(), &header.player_name);

    writeln!(out, "            <table class=\"data-table\">")?;
    writeln!(
        out,
        "                <thead><tr><th>Matchup</th><th>Opponent</th><th>Total</th><th>Wins</th><th>Losses</th><th>Win Rate</th></tr></thead>"
    )?;
    writeln!(out, "                <tbody>")?;
    for line in &summary.opponents {
        let pct = line.record.win_percentage();
        writeln!(out, "                    <tr>")?;
        writeln!(
            out,
            "                        <td><div class=\"player-matchup\">{}<span class=\"vs-indicator\">VS</span>{}</div></td>",
            player_avatar,
            avatar(store.opponent_avatar(&line.name), &line.name)
        )?;
        writeln!(
            out,
            "                        <td class=\"opponent-name\">{}</td>",
            escape_html(&line.name)
        )?;
        writeln!(
            out,
            "                        <td>{}</td><td>{}</td><td>{}</td>",
            line.record.total_matches, line.record.wins, line.record.losses
        )?;
        writeln!(
            out,
            "                        <td><span class=\"win-rate-badge {}\">{:.1}%</span></td>",
            win_rate_class(pct),
            pct
        )?;
        writeln!(out, "                    </tr>")?;
    }
    writeln!(out, "                </tbody>")?;
    writeln!(out, "            </table>")?;
    Ok(out)
}

/// Avatar image with an initial-letter fallback.
fn avatar(url: Option<&str>, name: &str) -> String {
    let initial = escape_html(&name.chars().next().unwrap_or('?').to_string());
    match url.filter(|u| !u.is_empty()) {
        Some(url) => format!(
            "<img src=\"{}\" alt=\"{}\" class=\"avatar\" onerror=\"this.style.display='none'; this.nextElementSibling.style.display='flex'\"><div class=\"avatar-fallback\" style=\"display:none;\">{}</div>",
            escape_html(url),
            escape_html(name),
            initial
        ),
        None => format!("<div class=\"avatar-fallback\">{}</div>", initial),
    }
}

/// Badge class: high at 70% and above, medium at 40% and above.
fn win_rate_class(win_percentage: f64) -> &'static str {
    if win_percentage >= 70.0 {
        "win-rate-high"
    } else if win_percentage >= 40.0 {
        "win-rate-medium"
    } else {
        "win-rate-low"
    }
}

/// "iBC PRO 360" -> "ibc-pro-360"
fn section_id(label: &str) -> String {
    label
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
