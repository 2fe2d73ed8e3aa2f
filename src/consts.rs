/// Weight of a history entry recorded today.
/// Each elapsed day subtracts one point, down to `MIN_HISTORY_WEIGHT`.
pub const MAX_SCORE: u64 = 300;

/// Floor for decayed weights. Old history still discourages exact repeats.
pub const MIN_HISTORY_WEIGHT: u64 = 1;

/// Default number of random partitions evaluated per run.
pub const DEFAULT_SAMPLE_COUNT: usize = 10_000;

/// Two groups with at least this many members in common count as a repeat.
pub const MATCH_THRESHOLD: usize = 2;

/// Accepted participant addresses when no pattern is configured.
pub const DEFAULT_EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@example\.com$";

/// Timestamp layout written to the history file.
pub const HISTORY_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub const HISTORY_HEADER: [&str; 2] = ["timestamp", "pairs"];
