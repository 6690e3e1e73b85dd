//! Head-to-head aggregation
//!
//! Turns a sequence of match records into win/loss tallies for the tracked
//! player against each opponent. Every qualifying match is counted in three
//! places: the global bucket, its tournament main type bucket and its sub type
//! bucket.
//!
//! Opponents are keyed by display name, not by user id. Two opponents sharing
//! a name share a record.

use crate::matches::{MatchRecord, MatchResult};
use crate::tournament::{classify, TournamentType};
use std::collections::{BTreeSet, HashMap};

/// Win/loss tally against one opponent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpponentRecord {
    pub wins: u32,
    pub losses: u32,
    /// Includes matches with neither a win nor a loss, so always >= wins + losses
    pub total_matches: u32,
}

impl OpponentRecord {
    /// Count one match with the tracked player's result.
    pub fn record(&mut self, result: MatchResult) {
        self.total_matches += 1;
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Other => {}
        }
    }

    /// Matches that were neither won nor lost
    pub fn undecided(&self) -> u32 {
        self.total_matches - self.wins - self.losses
    }

    /// wins / total as a fraction, 0 when no matches
    pub fn win_ratio(&self) -> f64 {
        if self.total_matches == 0 {
            0.0
        } else {
            self.wins as f64 / self.total_matches as f64
        }
    }

    /// wins / total as a percentage, 0 when no matches
    pub fn win_percentage(&self) -> f64 {
        self.win_ratio() * 100.0
    }
}

/// String-keyed map that remembers insertion order.
#[derive(Debug, Clone)]
struct InsertionMap<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

impl<V> Default for InsertionMap<V> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<V: Default> InsertionMap<V> {
    fn get_or_insert_default(&mut self, key: &str) -> &mut V {
        let idx = match self.index.get(key) {
            Some(&idx) => idx,
            None => {
                self.entries.push((key.to_string(), V::default()));
                self.index.insert(key.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        &mut self.entries[idx].1
    }
}

impl<V> InsertionMap<V> {
    fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Opponent tallies for one partition of matches, in first-seen order
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    opponents: InsertionMap<OpponentRecord>,
}

impl Bucket {
    /// Record for `opponent`, created zeroed on first use.
    pub fn get_or_insert_default(&mut self, opponent: &str) -> &mut OpponentRecord {
        self.opponents.get_or_insert_default(opponent)
    }

    pub fn get(&self, opponent: &str) -> Option<&OpponentRecord> {
        self.opponents.get(opponent)
    }

    /// Opponents in the order they were first seen
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OpponentRecord)> {
        self.opponents.iter()
    }

    pub fn len(&self) -> usize {
        self.opponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.opponents.len() == 0
    }

    /// Sum of all opponent records
    pub fn totals(&self) -> OpponentRecord {
        self.iter().fold(OpponentRecord::default(), |mut acc, (_, r)| {
            acc.wins += r.wins;
            acc.losses += r.losses;
            acc.total_matches += r.total_matches;
            acc
        })
    }
}

/// All aggregates built from one run over the match list
#[derive(Debug, Clone, Default)]
pub struct AggregateStore {
    global: Bucket,
    main_types: InsertionMap<Bucket>,
    sub_types: InsertionMap<Bucket>,
    tournament_types: BTreeSet<String>,
    player_avatar: Option<String>,
    opponent_avatars: HashMap<String, Option<String>>,
    processed: usize,
    skipped: usize,
}

impl AggregateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a single match for `player_id`.
    ///
    /// Returns `false` (and changes nothing but the skip counter) when the
    /// match is not a completed duel involving the player and one opponent.
    pub fn record_match(&mut self, record: &MatchRecord, player_id: &str) -> bool {
        if !record.is_completed_duel() {
            self.skipped += 1;
            return false;
        }
        let Some((myself, opponent)) = record.sides(player_id) else {
            self.skipped += 1;
            return false;
        };

        if self.player_avatar.is_none() {
            self.player_avatar = myself.avatar.filter(|url| !url.is_empty());
        }
        self.opponent_avatars
            .entry(opponent.name.clone())
            .or_insert(opponent.avatar);

        let TournamentType {
            main_type,
            sub_type,
        } = classify(record.tournament_name());
        self.tournament_types.insert(main_type.clone());

        let result = myself.result;
        self.global
            .get_or_insert_default(&opponent.name)
            .record(result);
        self.main_types
            .get_or_insert_default(&main_type)
            .get_or_insert_default(&opponent.name)
            .record(result);
        self.sub_types
            .get_or_insert_default(&sub_type)
            .get_or_insert_default(&opponent.name)
            .record(result);

        self.processed += 1;
        true
    }

    /// Head-to-head records across every tournament
    pub fn global(&self) -> &Bucket {
        &self.global
    }

    pub fn main_type(&self, label: &str) -> Option<&Bucket> {
        self.main_types.get(label)
    }

    pub fn sub_type(&self, label: &str) -> Option<&Bucket> {
        self.sub_types.get(label)
    }

    /// Main type buckets in first-seen order
    pub fn main_types(&self) -> impl Iterator<Item = (&str, &Bucket)> {
        self.main_types.iter()
    }

    /// Sub type buckets in first-seen order
    pub fn sub_types(&self) -> impl Iterator<Item = (&str, &Bucket)> {
        self.sub_types.iter()
    }

    /// Distinct main types seen, sorted
    pub fn tournament_types(&self) -> &BTreeSet<String> {
        &self.tournament_types
    }

    /// First non-empty avatar seen for the tracked player
    pub fn player_avatar(&self) -> Option<&str> {
        self.player_avatar.as_deref()
    }

    /// Avatar from the first match against `opponent`
    pub fn opponent_avatar(&self, opponent: &str) -> Option<&str> {
        self.opponent_avatars.get(opponent).and_then(|a| a.as_deref())
    }

    /// Matches counted
    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Matches ignored (not a completed duel, or player/opponent missing)
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

/// Aggregate `matches` for the player with id `player_id`.
pub fn aggregate(matches: &[MatchRecord], player_id: &str) -> AggregateStore {
    let mut store = AggregateStore::new();
    for record in matches {
        store.record_match(record, player_id);
    }
    log::info!(
        "Processed {} matches ({} skipped), {} opponents",
        store.processed,
        store.skipped,
        store.global.len()
    );
    store
}
