//! Cricket Head-to-Head
//!
//! Win/loss statistics for one tracked player against every opponent found in
//! tournament match records.
//!
//! This library provides:
//! - `matches`: Typed view over raw JSON match documents
//! - `loader`: Reads match files into one in-memory sequence
//! - `tournament`: Tournament-name taxonomy (main type / sub type)
//! - `aggregate`: Head-to-head aggregation into global and per-tournament buckets
//! - `query`: Summaries, best/toughest opponent and subtype lookups
//! - `report`: Console, CSV, HTML and detailed text renderers
//! - `pipeline`: End-to-end report generation for the CLI
//!
//! Binaries:
//! - `h2h-report`: Load match files, print summaries and write report files

pub mod aggregate;
pub mod loader;
pub mod matches;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod tournament;

pub use aggregate::{aggregate, AggregateStore, Bucket, OpponentRecord};
pub use matches::{MatchRecord, MatchResult, Participant};
pub use query::BucketSelector;
pub use tournament::{classify, TournamentType};
