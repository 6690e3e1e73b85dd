//! Report renderers
//!
//! All renderers read from an [`AggregateStore`](crate::aggregate::AggregateStore)
//! through the query layer and never modify it.

pub mod console;
pub mod csv_export;
pub mod html;
pub mod text;

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

/// Information shared by every report of one run
#[derive(Debug, Clone)]
pub struct ReportHeader {
    pub player_name: String,
    pub generated_at: NaiveDateTime,
}

impl ReportHeader {
    pub fn new(player_name: &str, generated_at: NaiveDateTime) -> Self {
        Self {
            player_name: player_name.to_string(),
            generated_at,
        }
    }

    /// e.g. "March 05, 2025 at 02:30 PM"
    pub fn generated_long(&self) -> String {
        self.generated_at.format("%B %d, %Y at %I:%M %p").to_string()
    }

    /// `<dir>/<prefix>_<YYYYmmdd_HHMMSS>.<ext>`
    pub fn output_path(&self, dir: &Path, prefix: &str, ext: &str) -> PathBuf {
        dir.join(format!(
            "{}_{}.{}",
            prefix,
            self.generated_at.format("%Y%m%d_%H%M%S"),
            ext
        ))
    }
}

/// Truncate a name to fit in a column.
pub(crate) fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        name.chars().take(max_len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn header() -> ReportHeader {
        let at = NaiveDate::from_ymd_opt(2025, 3, 5)
            .unwrap()
            .and_hms_opt(14, 30, 9)
            .unwrap();
        ReportHeader::new("Test Player", at)
    }

    #[test]
    fn test_output_path() {
        let path = header().output_path(Path::new("out"), "cricket_report", "html");
        assert_eq!(path, Path::new("out").join("cricket_report_20250305_143009.html"));
    }

    #[test]
    fn test_generated_long() {
        assert_eq!(header().generated_long(), "March 05, 2025 at 02:30 PM");
    }

    #[test]
    fn test_truncate_name() {
        assert_eq!(truncate_name("short", 24), "short");
        assert_eq!(truncate_name("abcdefghij", 4), "abcd");
        assert_eq!(truncate_name("ÅÄÖÜ", 2), "ÅÄ");
    }
}
