//! Cricket head-to-head report tool
//!
//! Loads tournament match files, computes the tracked player's record against
//! every opponent and writes console, CSV, HTML and text reports.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cricket_h2h::pipeline::{
    generate_reports, load_store, render_console_summary, ReportConfig, DEFAULT_INPUTS,
};
use cricket_h2h::query::{opponent_record, summary_for, BucketSelector, DEFAULT_MIN_MATCHES};
use cricket_h2h::report::console::{render_bucket_table, render_opponent_detail, render_subtypes};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "h2h-report")]
#[command(about = "Head-to-head statistics for one player from tournament match files")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct DataArgs {
    /// Input JSON files with a `match_details` array (repeatable)
    #[arg(short, long = "input", default_values = DEFAULT_INPUTS)]
    inputs: Vec<String>,

    /// User id of the tracked player
    #[arg(long)]
    player_id: String,
}

impl DataArgs {
    fn paths(&self) -> Vec<PathBuf> {
        self.inputs.iter().map(PathBuf::from).collect()
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print all summaries and write CSV, HTML and detailed text reports
    Report {
        #[command(flatten)]
        data: DataArgs,

        /// Display name used in report titles
        #[arg(long, default_value = "Player")]
        player_name: String,

        /// Directory for the generated report files
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Minimum matches against an opponent for best/toughest
        #[arg(long, default_value_t = DEFAULT_MIN_MATCHES)]
        min_matches: u32,

        /// Opponent rows shown per tournament table
        #[arg(long, default_value = "10")]
        top_n: usize,
    },

    /// Print the head-to-head table for one bucket
    Summary {
        #[command(flatten)]
        data: DataArgs,

        /// "All", a main type (e.g. "iBC 360") or a sub type (e.g. "iBC 360 - 250")
        #[arg(short, long, default_value = "All")]
        tournament: String,

        /// Display name used in the table title
        #[arg(long, default_value = "Player")]
        player_name: String,

        /// Limit the number of opponent rows
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Print the overall record against one opponent
    Opponent {
        #[command(flatten)]
        data: DataArgs,

        /// Opponent display name
        name: String,
    },

    /// List the sub types of a tournament main type
    Subtypes {
        #[command(flatten)]
        data: DataArgs,

        /// Main type, e.g. "iBC PRO 360"
        main_type: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            player_name,
            output_dir,
            min_matches,
            top_n,
        } => {
            let config = ReportConfig {
                inputs: data.paths(),
                player_id: data.player_id,
                player_name,
                output_dir,
                min_matches,
                top_n,
            };
            let outcome = generate_reports(&config, chrono::Local::now().naive_local())?;

            print!("{}", outcome.console);
            println!("\nAnalysis complete! ({} matches processed)", outcome.processed);
            println!("Tournament types found: {:?}", outcome.tournament_types);
            println!("\nFiles created:");
            println!("   Detailed Report: {}", outcome.text_path.display());
            println!("   CSV Export: {}", outcome.csv_path.display());
            println!("   HTML Report: {}", outcome.html_path.display());
        }
        Commands::Summary {
            data,
            tournament,
            player_name,
            top_n,
        } => {
            let store = load_store(&data.paths(), &data.player_id)?;
            let selector = BucketSelector::from_label(&store, &tournament);
            let summary = summary_for(&store, &selector);
            print!("{}", render_bucket_table(&summary, &player_name, top_n)?);
            if top_n.is_none() && summary.total_matches > 0 {
                println!("Unique Opponents: {}", summary.opponents_count());
            }
        }
        Commands::Opponent { data, name } => {
            let store = load_store(&data.paths(), &data.player_id)?;
            print!(
                "{}",
                render_opponent_detail(&name, opponent_record(&store, &name).as_ref())?
            );
        }
        Commands::Subtypes { data, main_type } => {
            let store = load_store(&data.paths(), &data.player_id)?;
            print!("{}", render_subtypes(&store, &main_type)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["h2h-report", "report", "--player-id", "P1"]).unwrap();
        match cli.command {
            Commands::Report {
                data,
                player_name,
                min_matches,
                top_n,
                ..
            } => {
                assert_eq!(data.inputs, DEFAULT_INPUTS.to_vec());
                assert_eq!(data.player_id, "P1");
                assert_eq!(player_name, "Player");
                assert_eq!(min_matches, 2);
                assert_eq!(top_n, 10);
            }
            _ => panic!("expected report command"),
        }
    }

    #[test]
    fn test_cli_repeated_inputs() {
        let cli = Cli::try_parse_from([
            "h2h-report",
            "summary",
            "-i",
            "a.json",
            "-i",
            "b.json",
            "--player-id",
            "P1",
            "--tournament",
            "iBC 360",
        ])
        .unwrap();
        match cli.command {
            Commands::Summary {
                data, tournament, ..
            } => {
                assert_eq!(data.paths(), vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
                assert_eq!(tournament, "iBC 360");
            }
            _ => panic!("expected summary command"),
        }
    }

    #[test]
    fn test_cli_requires_player_id() {
        assert!(Cli::try_parse_from(["h2h-report", "opponent", "Sam"]).is_err());
    }
}
