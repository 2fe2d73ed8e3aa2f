use crate::core_types::Identifier;
use crate::error::{SynResult, SynapseError};
use regex::Regex;
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

pub fn compile_pattern(pattern: &str) -> SynResult<Regex> {
    Ok(Regex::new(pattern)?)
}

/// Trims each address, keeps those matching `pattern`, then drops repeats
/// while preserving first-seen order.
pub fn filter_emails<I, S>(raw: I, pattern: &Regex) -> Vec<Identifier>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    raw.into_iter()
        .map(|s| s.as_ref().trim().to_string())
        .filter(|email| pattern.is_match(email))
        .filter(|email| seen.insert(email.clone()))
        .collect()
}

/// Raw values of the `column` column (matched case-insensitively).
pub fn read_column<R: Read>(reader: R, column: &str) -> SynResult<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(true)
        .from_reader(reader);

    let idx = rdr
        .headers()?
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(column))
        .ok_or_else(|| SynapseError::Config(format!("Roster has no '{}' column", column)))?;

    let mut values = Vec::new();
    for (row_idx, result) in rdr.records().enumerate() {
        let row = row_idx + 2;
        match result {
            Ok(rec) => match rec.get(idx) {
                Some(value) => values.push(value.to_string()),
                None => warn!("Roster row {}: no '{}' value", row, column),
            },
            Err(e) => warn!("Roster row {}: unreadable ({})", row, e),
        }
    }
    Ok(values)
}

/// Reads the participant list, filters it and deduplicates it.
pub fn load_roster<P: AsRef<Path>>(
    path: P,
    column: &str,
    pattern: &Regex,
) -> SynResult<Vec<Identifier>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SynapseError::Config(format!("Could not open roster '{}': {}", path.display(), e))
    })?;

    let raw = read_column(file, column)?;
    let total = raw.len();
    let identifiers = filter_emails(raw, pattern);

    debug!(
        "Roster '{}': {} rows, {} accepted",
        path.display(),
        total,
        identifiers.len()
    );
    if identifiers.len() < total {
        info!(
            "Ignored {} roster entries (invalid or duplicate).",
            total - identifiers.len()
        );
    }

    Ok(identifiers)
}
