//! Match records
//!
//! A match is kept as the raw JSON document it was loaded from. Fields are read
//! on demand through best-effort lookups, since source files differ in where
//! they nest some values (notably the tournament name).

use serde_json::Value;

/// Status value of a finished match
pub const STATUS_COMPLETED: &str = "COMPLETED";
/// Mode value of a one-on-one match
pub const MODE_DUAL_PLAYER: &str = "DUAL_PLAYER";

/// Name used for participants without a `name` field
pub const UNKNOWN_NAME: &str = "Unknown";

/// Field paths that may hold the tournament name, tried in order
pub const TOURNAMENT_NAME_PATHS: &[&[&str]] = &[
    &["tournament_name"],
    &[
        "tournament_match_details",
        "tournament_type_details",
        "tournament_name",
    ],
];

const PARTICIPANTS_PATH: &[&str] = &["match_user_details", "users"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStatus {
    Completed,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    DualPlayer,
    Other,
}

/// A participant's result in one match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Win,
    Loss,
    /// Draws, abandoned results or a missing field
    Other,
}

impl MatchStatus {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(STATUS_COMPLETED) => MatchStatus::Completed,
            _ => MatchStatus::Other,
        }
    }
}

impl MatchMode {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some(MODE_DUAL_PLAYER) => MatchMode::DualPlayer,
            _ => MatchMode::Other,
        }
    }
}

impl MatchResult {
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("WIN") => MatchResult::Win,
            Some("LOSS") => MatchResult::Loss,
            _ => MatchResult::Other,
        }
    }
}

/// One entry of a match's user list
#[derive(Debug, Clone, PartialEq)]
pub struct Participant {
    pub id: Option<String>,
    pub name: String,
    pub result: MatchResult,
    pub avatar: Option<String>,
}

impl Participant {
    fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(Value::as_str);
        Participant {
            id: field("user_id").map(str::to_string),
            name: field("name").unwrap_or(UNKNOWN_NAME).to_string(),
            result: MatchResult::parse(field("result")),
            avatar: field("pic_url").map(str::to_string),
        }
    }
}

/// A single match as read from an input file
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRecord {
    doc: Value,
}

impl MatchRecord {
    pub fn from_value(doc: Value) -> Self {
        Self { doc }
    }

    pub fn status(&self) -> MatchStatus {
        MatchStatus::parse(self.doc.get("status").and_then(Value::as_str))
    }

    pub fn mode(&self) -> MatchMode {
        MatchMode::parse(self.doc.get("match_mode").and_then(Value::as_str))
    }

    /// Completed one-on-one match
    pub fn is_completed_duel(&self) -> bool {
        self.status() == MatchStatus::Completed && self.mode() == MatchMode::DualPlayer
    }

    /// Tournament name from the first path in [`TOURNAMENT_NAME_PATHS`] that holds a string.
    pub fn tournament_name(&self) -> Option<&str> {
        resolve_str(&self.doc, TOURNAMENT_NAME_PATHS)
    }

    pub fn participants(&self) -> Vec<Participant> {
        lookup_path(&self.doc, PARTICIPANTS_PATH)
            .and_then(Value::as_array)
            .map(|users| users.iter().map(Participant::from_value).collect())
            .unwrap_or_default()
    }

    /// Split participants into (tracked player, opponent).
    ///
    /// The opponent is the last participant whose id differs from `player_id`.
    /// Returns `None` when either side is missing.
    pub fn sides(&self, player_id: &str) -> Option<(Participant, Participant)> {
        let mut myself = None;
        let mut opponent = None;
        for participant in self.participants() {
            if participant.id.as_deref() == Some(player_id) {
                myself = Some(participant);
            } else {
                opponent = Some(participant);
            }
        }
        Some((myself?, opponent?))
    }
}

/// Follow a chain of object keys.
pub fn lookup_path<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(doc, |current, key| current.get(*key))
}

/// First string found at any of `paths`, in order.
///
/// A path that exists but holds a non-string (e.g. `null`) counts as absent.
pub fn resolve_str<'a>(doc: &'a Value, paths: &[&[&str]]) -> Option<&'a str> {
    paths
        .iter()
        .find_map(|path| lookup_path(doc, path).and_then(Value::as_str))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn duel(users: Value) -> MatchRecord {
        MatchRecord::from_value(json!({
            "status": "COMPLETED",
            "match_mode": "DUAL_PLAYER",
            "match_user_details": { "users": users },
        }))
    }

    #[test]
    fn test_status_and_mode() {
        let m = duel(json!([]));
        assert_eq!(m.status(), MatchStatus::Completed);
        assert_eq!(m.mode(), MatchMode::DualPlayer);
        assert!(m.is_completed_duel());

        let m = MatchRecord::from_value(json!({ "status": "IN_PROGRESS", "match_mode": "DUAL_PLAYER" }));
        assert_eq!(m.status(), MatchStatus::Other);
        assert!(!m.is_completed_duel());

        let m = MatchRecord::from_value(json!({ "status": "COMPLETED" }));
        assert_eq!(m.mode(), MatchMode::Other);
        assert!(!m.is_completed_duel());
    }

    #[test]
    fn test_tournament_name_primary_path() {
        let m = MatchRecord::from_value(json!({
            "tournament_name": "iBC 360 - 250",
            "tournament_match_details": {
                "tournament_type_details": { "tournament_name": "ignored" }
            }
        }));
        assert_eq!(m.tournament_name(), Some("iBC 360 - 250"));
    }

    #[test]
    fn test_tournament_name_fallback_path() {
        let m = MatchRecord::from_value(json!({
            "tournament_match_details": {
                "tournament_type_details": { "tournament_name": "iBC PRO 360 - 500" }
            }
        }));
        assert_eq!(m.tournament_name(), Some("iBC PRO 360 - 500"));

        let m = MatchRecord::from_value(json!({
            "tournament_name": null,
            "tournament_match_details": {
                "tournament_type_details": { "tournament_name": "Weekly Cup" }
            }
        }));
        assert_eq!(m.tournament_name(), Some("Weekly Cup"));
    }

    #[test]
    fn test_tournament_name_absent() {
        let m = MatchRecord::from_value(json!({ "tournament_match_details": {} }));
        assert_eq!(m.tournament_name(), None);
    }

    #[test]
    fn test_participant_defaults() {
        let m = duel(json!([{ "user_id": "P1" }, { "user_id": "P2", "name": "A", "result": "LOSS", "pic_url": "a.png" }]));
        let users = m.participants();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].name, UNKNOWN_NAME);
        assert_eq!(users[0].result, MatchResult::Other);
        assert_eq!(users[0].avatar, None);
        assert_eq!(users[1].result, MatchResult::Loss);
        assert_eq!(users[1].avatar.as_deref(), Some("a.png"));
    }

    #[test]
    fn test_sides() {
        let m = duel(json!([
            { "user_id": "P2", "name": "A", "result": "LOSS" },
            { "user_id": "P1", "name": "Me", "result": "WIN" },
        ]));
        let (me, opp) = m.sides("P1").unwrap();
        assert_eq!(me.name, "Me");
        assert_eq!(me.result, MatchResult::Win);
        assert_eq!(opp.name, "A");

        assert!(m.sides("P9").is_none());
    }

    #[test]
    fn test_sides_requires_opponent() {
        let m = duel(json!([{ "user_id": "P1", "name": "Me", "result": "WIN" }]));
        assert!(m.sides("P1").is_none());

        let m = duel(json!([
            { "user_id": "P1", "result": "WIN" },
            { "user_id": "P1", "result": "LOSS" },
        ]));
        assert!(m.sides("P1").is_none());
    }

    #[test]
    fn test_missing_user_list() {
        let m = MatchRecord::from_value(json!({ "status": "COMPLETED" }));
        assert!(m.participants().is_empty());
        assert!(m.sides("P1").is_none());
    }
}
