//! Tournament taxonomy
//!
//! Maps free-text tournament names to a two-level classification: a main type
//! (the tournament series) and a sub type (the tier inside that series, e.g.
//! "iBC 360 - 250").

/// Main type for the professional 360 series
pub const IBC_PRO_360: &str = "iBC PRO 360";
/// Main type for the standard 360 series
pub const IBC_360: &str = "iBC 360";
/// Main type for anything not recognised
pub const OTHER: &str = "Other";
/// Placeholder used when a name or tier cannot be determined
pub const UNKNOWN: &str = "Unknown";
/// Separator between a series and its tier, in both names and sub type labels
pub const SEPARATOR: &str = " - ";

/// Main types in the order reports list them
pub const STANDARD_MAIN_TYPES: [&str; 3] = [IBC_PRO_360, IBC_360, OTHER];

/// Classification of a single tournament name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TournamentType {
    /// Series label, e.g. "iBC PRO 360"
    pub main_type: String,
    /// Tier label, e.g. "iBC PRO 360 - 500", or the raw name for other series
    pub sub_type: String,
}

impl TournamentType {
    fn new(main_type: &str, sub_type: impl Into<String>) -> Self {
        Self {
            main_type: main_type.to_string(),
            sub_type: sub_type.into(),
        }
    }
}

/// Classify a tournament name.
///
/// Rules, first match wins:
/// 1. Absent or empty name: `("Other", "Unknown")`
/// 2. Contains "iBC PRO 360": tier taken from the token after the first `" - "`
/// 3. Contains "iBC 360" but not "iBC PRO 360": same tier rule
/// 4. Anything else: `("Other", <name>)`
///
/// Never fails.
pub fn classify(tournament_name: Option<&str>) -> TournamentType {
    let name = match tournament_name {
        Some(name) if !name.is_empty() => name,
        _ => return TournamentType::new(OTHER, UNKNOWN),
    };

    if name.contains(IBC_PRO_360) {
        TournamentType::new(IBC_PRO_360, series_sub_type(IBC_PRO_360, name))
    } else if name.contains(IBC_360) && !name.contains(IBC_PRO_360) {
        TournamentType::new(IBC_360, series_sub_type(IBC_360, name))
    } else {
        TournamentType::new(OTHER, name)
    }
}

/// Build "<series> - <tier>" where tier is the first space-separated token of
/// the part after the first separator.
fn series_sub_type(series: &str, name: &str) -> String {
    let tier = name
        .split(SEPARATOR)
        .nth(1)
        .and_then(|part| part.split(' ').next())
        .unwrap_or(UNKNOWN);
    format!("{}{}{}", series, SEPARATOR, tier)
}

/// Whether `label` is a sub type of `main_type` (i.e. starts with "<main_type> - ").
pub fn is_sub_type_of(label: &str, main_type: &str) -> bool {
    label
        .strip_prefix(main_type)
        .is_some_and(|rest| rest.starts_with(SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(name: Option<&str>) -> (String, String) {
        let t = classify(name);
        (t.main_type, t.sub_type)
    }

    #[test]
    fn test_classify_pro_series() {
        assert_eq!(
            pair(Some("iBC PRO 360 - 500 Something")),
            ("iBC PRO 360".to_string(), "iBC PRO 360 - 500".to_string())
        );
        assert_eq!(
            pair(Some("Weekend iBC PRO 360 - 1000 Finals - Day 2")),
            ("iBC PRO 360".to_string(), "iBC PRO 360 - 1000".to_string())
        );
    }

    #[test]
    fn test_classify_standard_series() {
        assert_eq!(
            pair(Some("iBC 360 - 250 Blitz")),
            ("iBC 360".to_string(), "iBC 360 - 250".to_string())
        );
    }

    #[test]
    fn test_classify_pro_name_is_never_standard() {
        let t = classify(Some("iBC PRO 360 - 500"));
        assert_eq!(t.main_type, IBC_PRO_360);
        assert_ne!(t.main_type, IBC_360);
    }

    #[test]
    fn test_classify_missing_tier() {
        assert_eq!(
            pair(Some("iBC PRO 360 Open")),
            ("iBC PRO 360".to_string(), "iBC PRO 360 - Unknown".to_string())
        );
        assert_eq!(
            pair(Some("iBC 360")),
            ("iBC 360".to_string(), "iBC 360 - Unknown".to_string())
        );
    }

    #[test]
    fn test_classify_tier_with_leading_space_is_empty() {
        // Two spaces after the separator leave an empty first token
        assert_eq!(classify(Some("iBC 360 -  250")).sub_type, "iBC 360 - ");
    }

    #[test]
    fn test_classify_other() {
        assert_eq!(
            pair(Some("Weekly Cup")),
            ("Other".to_string(), "Weekly Cup".to_string())
        );
        assert_eq!(
            pair(Some("ibc 360 - 250")),
            ("Other".to_string(), "ibc 360 - 250".to_string())
        );
    }

    #[test]
    fn test_classify_absent_or_empty() {
        assert_eq!(pair(None), ("Other".to_string(), "Unknown".to_string()));
        assert_eq!(pair(Some("")), ("Other".to_string(), "Unknown".to_string()));
    }

    #[test]
    fn test_is_sub_type_of() {
        assert!(is_sub_type_of("iBC 360 - 250", "iBC 360"));
        assert!(!is_sub_type_of("iBC 360", "iBC 360"));
        assert!(!is_sub_type_of("iBC PRO 360 - 500", "iBC 360"));
        assert!(!is_sub_type_of("iBC 3600 - 1", "iBC 360"));
    }
}
