use crate::clock::Clock;
use crate::consts::{HISTORY_HEADER, HISTORY_TIMESTAMP_FORMAT, MAX_SCORE, MIN_HISTORY_WEIGHT};
use crate::core_types::{Group, HistoryEntry, Partition};
use crate::error::SynResult;
use chrono::{DateTime, NaiveDateTime, Utc};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const NAIVE_LAYOUTS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// One stored row: when a partition was sent and what it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    pub timestamp: DateTime<Utc>,
    pub partition: Partition,
}

impl HistoryRecord {
    pub fn to_entry(&self, now: DateTime<Utc>) -> HistoryEntry {
        HistoryEntry::new(weight_at(self.timestamp, now), self.partition.clone())
    }
}

/// `MAX_SCORE` minus the age in days, never below `MIN_HISTORY_WEIGHT`.
pub fn weight_for_age(days_elapsed: i64) -> u64 {
    let days = days_elapsed.max(0) as u64;
    MAX_SCORE.saturating_sub(days).max(MIN_HISTORY_WEIGHT)
}

/// Whole days between `then` and `now`. Future timestamps count as today.
pub fn days_elapsed(then: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - then).num_days().max(0)
}

pub fn weight_at(then: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    weight_for_age(days_elapsed(then, now))
}

/// Parses RFC 3339, or a naive `YYYY-MM-DDTHH:MM:SS[.fff]` read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NAIVE_LAYOUTS
        .iter()
        .find_map(|layout| NaiveDateTime::parse_from_str(raw, layout).ok())
        .map(|naive| naive.and_utc())
}

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(HISTORY_TIMESTAMP_FORMAT).to_string()
}

/// Append-only CSV file of sent partitions (`timestamp,pairs`), where `pairs`
/// is the partition as a JSON array of arrays.
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads every well-formed row. Corrupt rows are logged and skipped.
    pub fn load_records(&self) -> SynResult<Vec<HistoryRecord>> {
        if !self.path.exists() {
            info!(
                "No history at '{}'. Starting without repeat penalties.",
                self.path.display()
            );
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .from_reader(file);

        let mut records = Vec::new();
        let mut skipped = 0;

        for (row_idx, result) in rdr.records().enumerate() {
            let row = row_idx + 2;
            let rec = match result {
                Ok(rec) => rec,
                Err(e) => {
                    warn!("History row {}: unreadable ({})", row, e);
                    skipped += 1;
                    continue;
                }
            };

            if rec.len() < 2 {
                warn!("History row {}: expected 2 columns, found {}", row, rec.len());
                skipped += 1;
                continue;
            }

            let Some(timestamp) = parse_timestamp(&rec[0]) else {
                warn!("History row {}: bad timestamp '{}'", row, &rec[0]);
                skipped += 1;
                continue;
            };

            let partition: Partition = match serde_json::from_str(&rec[1]) {
                Ok(p) => p,
                Err(e) => {
                    warn!("History row {}: bad pairs ({})", row, e);
                    skipped += 1;
                    continue;
                }
            };

            records.push(HistoryRecord {
                timestamp,
                partition,
            });
        }

        if skipped > 0 {
            warn!("Skipped {} malformed history rows.", skipped);
        }
        debug!(
            "Loaded {} history rows from '{}'",
            records.len(),
            self.path.display()
        );

        Ok(records)
    }

    /// Loads history and weights each row by its age relative to `clock`.
    pub fn load_entries(&self, clock: &dyn Clock) -> SynResult<Vec<HistoryEntry>> {
        let now = clock.now();
        Ok(self
            .load_records()?
            .iter()
            .map(|record| record.to_entry(now))
            .collect())
    }

    /// Appends `partition` stamped with the clock's current time.
    pub fn append(&self, partition: &[Group], clock: &dyn Clock) -> SynResult<HistoryRecord> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let needs_header = file.metadata()?.len() == 0;

        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if needs_header {
            wtr.write_record(HISTORY_HEADER)?;
        }

        let record = HistoryRecord {
            timestamp: clock.now(),
            partition: partition.to_vec(),
        };
        let pairs = serde_json::to_string(&record.partition)?;
        wtr.write_record([format_timestamp(record.timestamp), pairs])?;
        wtr.flush()?;

        Ok(record)
    }
}
