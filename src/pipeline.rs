//! Pipeline functions for programmatic use by the CLI.
//!
//! These run the load → aggregate → report workflow and return structured
//! data and rendered text instead of printing to stdout.

use crate::aggregate::{aggregate, AggregateStore};
use crate::loader::load_matches;
use crate::query::{
    best_opponent, subtypes_of, summary_for, toughest_opponent, BucketSelector,
    DEFAULT_MIN_MATCHES,
};
use crate::report::console::{render_bucket_table, render_matchup, render_subtypes};
use crate::report::{csv_export, html, text, ReportHeader};
use crate::tournament::{IBC_360, IBC_PRO_360, STANDARD_MAIN_TYPES};
use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Default input files, relative to the working directory
pub const DEFAULT_INPUTS: [&str; 2] = ["data/tournament1.json", "data/tournament2.json"];

// ============================================================================
// Load
// ============================================================================

/// Load every input file and aggregate it for `player_id`.
///
/// Fails when no match could be loaded from any file.
pub fn load_store<P: AsRef<Path>>(inputs: &[P], player_id: &str) -> Result<AggregateStore> {
    let matches = load_matches(inputs).context("No data loaded, check the input files")?;
    Ok(aggregate(&matches, player_id))
}

// ============================================================================
// Console Summary
// ============================================================================

/// Tables for all tournaments, each main type and each 360-series sub type,
/// followed by best/toughest matchups.
pub fn render_console_summary(
    store: &AggregateStore,
    player_name: &str,
    top_n: usize,
    min_matches: u32,
) -> Result<String> {
    let mut out = String::new();
    let all = summary_for(store, &BucketSelector::All);
    out.push_str(&render_bucket_table(&all, player_name, None)?);

    let main_types: Vec<&str> = STANDARD_MAIN_TYPES
        .iter()
        .copied()
        .filter(|t| store.tournament_types().contains(*t))
        .collect();

    for main_type in &main_types {
        let summary = summary_for(store, &BucketSelector::MainType(main_type.to_string()));
        out.push_str(&render_bucket_table(&summary, player_name, Some(top_n))?);
    }

    writeln!(out, "\nTOURNAMENT SUBTYPES ANALYSIS")?;
    writeln!(out, "{:=<60}", "")?;
    for series in [IBC_PRO_360, IBC_360] {
        out.push_str(&render_subtypes(store, series)?);
        for label in subtypes_of(store, series) {
            let summary = summary_for(store, &BucketSelector::SubType(label));
            out.push_str(&render_bucket_table(&summary, player_name, Some(top_n))?);
        }
    }

    out.push_str(&render_matchup(
        "BEST MATCHUP",
        best_opponent(store, min_matches).as_ref(),
        min_matches,
    ));
    out.push_str(&render_matchup(
        "TOUGHEST OPPONENT",
        toughest_opponent(store, min_matches).as_ref(),
        min_matches,
    ));

    writeln!(out, "\nSUMMARY:")?;
    writeln!(out, "   Total Opponents: {}", all.opponents_count())?;
    writeln!(out, "   Overall Win Rate: {:.1}%", all.win_percentage)?;
    for main_type in &main_types {
        let summary = summary_for(store, &BucketSelector::MainType(main_type.to_string()));
        writeln!(out, "   {} Win Rate: {:.1}%", main_type, summary.win_percentage)?;
    }
    Ok(out)
}

// ============================================================================
// Report Files
// ============================================================================

/// Configuration for a full report run.
pub struct ReportConfig {
    /// Match files to load, in order
    pub inputs: Vec<PathBuf>,
    /// User id of the tracked player
    pub player_id: String,
    /// Display name used in report titles
    pub player_name: String,
    /// Directory the report files are written to
    pub output_dir: PathBuf,
    /// Minimum matches for best/toughest opponent
    pub min_matches: u32,
    /// Opponent rows shown per main type table
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            inputs: DEFAULT_INPUTS.iter().map(PathBuf::from).collect(),
            player_id: String::new(),
            player_name: "Player".to_string(),
            output_dir: PathBuf::from("."),
            min_matches: DEFAULT_MIN_MATCHES,
            top_n: 10,
        }
    }
}

/// Files and text produced by [`generate_reports`].
pub struct ReportOutcome {
    pub console: String,
    pub csv_path: PathBuf,
    pub html_path: PathBuf,
    pub text_path: PathBuf,
    pub processed: usize,
    pub tournament_types: Vec<String>,
}

/// Load, aggregate, render the console summary and write the CSV, HTML and
/// detailed text reports. All files share the `generated_at` timestamp.
pub fn generate_reports(
    config: &ReportConfig,
    generated_at: NaiveDateTime,
) -> Result<ReportOutcome> {
    let store = load_store(&config.inputs, &config.player_id)?;
    let header = ReportHeader::new(&config.player_name, generated_at);

    let console = render_console_summary(
        &store,
        &config.player_name,
        config.top_n,
        config.min_matches,
    )?;

    let text_path = header.output_path(&config.output_dir, "cricket_detailed_report", "txt");
    text::write_detailed_report(&store, &header, &text_path)?;

    let csv_path = header.output_path(&config.output_dir, "cricket_data_export", "csv");
    csv_export::write_csv_file(&store, &csv_path)?;

    let html_path = header.output_path(&config.output_dir, "cricket_report", "html");
    html::write_html_file(&store, &header, &html_path)?;

    Ok(ReportOutcome {
        console,
        csv_path,
        html_path,
        text_path,
        processed: store.processed(),
        tournament_types: store.tournament_types().iter().cloned().collect(),
    })
}
