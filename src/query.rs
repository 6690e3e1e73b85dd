//! Summary views over an [`AggregateStore`].

use crate::aggregate::{AggregateStore, Bucket, OpponentRecord};
use crate::tournament::is_sub_type_of;

/// Minimum matches against an opponent before they count for best/toughest
pub const DEFAULT_MIN_MATCHES: u32 = 2;

/// Label used for the bucket covering every tournament
pub const ALL_LABEL: &str = "All";

/// Which bucket a summary is built from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketSelector {
    All,
    MainType(String),
    SubType(String),
}

impl BucketSelector {
    /// Resolve a free-form label: "All", then main types, then sub types.
    ///
    /// Labels not present in the store resolve to a sub type selector, which
    /// summarises as empty.
    pub fn from_label(store: &AggregateStore, label: &str) -> Self {
        if label.eq_ignore_ascii_case(ALL_LABEL) {
            BucketSelector::All
        } else if store.main_type(label).is_some() {
            BucketSelector::MainType(label.to_string())
        } else {
            BucketSelector::SubType(label.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            BucketSelector::All => ALL_LABEL,
            BucketSelector::MainType(label) | BucketSelector::SubType(label) => label,
        }
    }

    fn bucket<'a>(&self, store: &'a AggregateStore) -> Option<&'a Bucket> {
        match self {
            BucketSelector::All => Some(store.global()),
            BucketSelector::MainType(label) => store.main_type(label),
            BucketSelector::SubType(label) => store.sub_type(label),
        }
    }
}

/// One opponent line in a summary
#[derive(Debug, Clone, PartialEq)]
pub struct OpponentLine {
    pub name: String,
    pub record: OpponentRecord,
}

/// Totals and opponent list for one bucket
#[derive(Debug, Clone, PartialEq)]
pub struct BucketSummary {
    pub label: String,
    pub total_wins: u32,
    pub total_losses: u32,
    pub total_matches: u32,
    pub win_percentage: f64,
    /// Sorted by total matches, most faced first; ties keep first-seen order
    pub opponents: Vec<OpponentLine>,
}

impl BucketSummary {
    pub fn opponents_count(&self) -> usize {
        self.opponents.len()
    }

    /// The `n` most faced opponents
    pub fn top(&self, n: usize) -> &[OpponentLine] {
        &self.opponents[..n.min(self.opponents.len())]
    }

    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }
}

/// Summarise the selected bucket. A bucket that does not exist summarises as zeros.
pub fn summary_for(store: &AggregateStore, selector: &BucketSelector) -> BucketSummary {
    let (totals, mut opponents) = match selector.bucket(store) {
        Some(bucket) => (
            bucket.totals(),
            bucket
                .iter()
                .map(|(name, record)| OpponentLine {
                    name: name.to_string(),
                    record: *record,
                })
                .collect::<Vec<_>>(),
        ),
        None => (OpponentRecord::default(), Vec::new()),
    };

    opponents.sort_by(|a, b| b.record.total_matches.cmp(&a.record.total_matches));

    BucketSummary {
        label: selector.label().to_string(),
        total_wins: totals.wins,
        total_losses: totals.losses,
        total_matches: totals.total_matches,
        win_percentage: totals.win_percentage(),
        opponents,
    }
}

/// An opponent picked by win rate
#[derive(Debug, Clone, PartialEq)]
pub struct Matchup {
    pub name: String,
    pub record: OpponentRecord,
    /// wins / total, between 0 and 1
    pub win_rate: f64,
}

/// Opponent with the highest win rate among those faced at least `min_matches` times.
pub fn best_opponent(store: &AggregateStore, min_matches: u32) -> Option<Matchup> {
    pick_opponent(store, min_matches, |candidate, current| candidate > current)
}

/// Opponent with the lowest win rate among those faced at least `min_matches` times.
pub fn toughest_opponent(store: &AggregateStore, min_matches: u32) -> Option<Matchup> {
    pick_opponent(store, min_matches, |candidate, current| candidate < current)
}

/// Walk the global bucket in first-seen order, replacing the pick only when
/// `better` holds strictly, so ties go to the earliest opponent.
fn pick_opponent(
    store: &AggregateStore,
    min_matches: u32,
    better: impl Fn(f64, f64) -> bool,
) -> Option<Matchup> {
    let mut picked: Option<Matchup> = None;
    for (name, record) in store.global().iter() {
        if record.total_matches < min_matches || record.total_matches == 0 {
            continue;
        }
        let win_rate = record.win_ratio();
        if picked.as_ref().map_or(true, |p| better(win_rate, p.win_rate)) {
            picked = Some(Matchup {
                name: name.to_string(),
                record: *record,
                win_rate,
            });
        }
    }
    picked
}

/// Sub type labels under `main_type`, sorted.
pub fn subtypes_of(store: &AggregateStore, main_type: &str) -> Vec<String> {
    let mut labels: Vec<String> = store
        .sub_types()
        .map(|(label, _)| label)
        .filter(|label| is_sub_type_of(label, main_type))
        .map(str::to_string)
        .collect();
    labels.sort();
    labels
}

/// Overall record against a single opponent
pub fn opponent_record(store: &AggregateStore, name: &str) -> Option<OpponentRecord> {
    store.global().get(name).copied()
}
