use std::fs;
use std::path::Path;

use crate::error::{BoardError, Result};

/// Drops repeated activities, keeping each at its first position.
pub fn distinct<S: AsRef<str>>(activities: impl IntoIterator<Item = S>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for activity in activities {
        let activity = activity.as_ref();
        if !unique.iter().any(|a| a == activity) {
            unique.push(activity.to_string());
        }
    }
    unique
}

/// Parses an activity list: one activity per line, surrounding whitespace trimmed, blank lines
/// skipped and repeated entries collapsed to their first occurrence.
pub fn parse_activities(text: &str) -> Vec<String> {
    distinct(text.lines().map(str::trim).filter(|l| !l.is_empty()))
}

pub fn load_activities(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| BoardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let activities = parse_activities(&text);
    log::info!("loaded {} activities from {}", activities.len(), path.display());
    Ok(activities)
}
