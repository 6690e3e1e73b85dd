//! Match file loading
//!
//! Each input file is a JSON object with a `match_details` array. Files that
//! are missing or malformed are logged and skipped; only an empty overall
//! result is fatal.

use crate::matches::MatchRecord;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level field holding the match array
pub const MATCH_ARRAY_FIELD: &str = "match_details";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed input in {}: {reason}", path.display())]
    MalformedInput { path: PathBuf, reason: String },
    #[error("no matches loaded from {files} input file(s)")]
    EmptyDataset { files: usize },
}

#[derive(Deserialize)]
struct MatchFile {
    match_details: Option<Vec<serde_json::Value>>,
}

/// Load every match from one file.
pub fn load_file(path: &Path) -> Result<Vec<MatchRecord>, LoadError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => LoadError::MissingFile(path.to_path_buf()),
        _ => LoadError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let parsed: MatchFile = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            LoadError::Unreadable {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            LoadError::MalformedInput {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        }
    })?;

    let details = parsed
        .match_details
        .ok_or_else(|| LoadError::MalformedInput {
            path: path.to_path_buf(),
            reason: format!("no '{}' array found", MATCH_ARRAY_FIELD),
        })?;

    Ok(details.into_iter().map(MatchRecord::from_value).collect())
}

/// Load and concatenate matches from `paths`, in file order.
///
/// Bad files are logged and skipped. Fails with [`LoadError::EmptyDataset`]
/// when nothing was loaded.
pub fn load_matches<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<MatchRecord>, LoadError> {
    let mut matches = Vec::new();

    for path in paths {
        let path = path.as_ref();
        match load_file(path) {
            Ok(records) => {
                log::info!("Loaded {} matches from {}", records.len(), path.display());
                matches.extend(records);
            }
            Err(e @ LoadError::MissingFile(_)) => log::warn!("{}", e),
            Err(e) => log::error!("{}", e),
        }
    }

    if matches.is_empty() {
        return Err(LoadError::EmptyDataset { files: paths.len() });
    }

    log::info!("Total matches loaded: {}", matches.len());
    Ok(matches)
}
