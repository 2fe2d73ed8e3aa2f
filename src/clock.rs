use crate::error::{SynResult, SynapseError};
use crate::history::parse_timestamp;
use chrono::{DateTime, Utc};

/// Source of "now" for weighting history and stamping new rows.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self { at }
    }

    /// Accepts the same layouts as the history file.
    pub fn parse(raw: &str) -> SynResult<Self> {
        parse_timestamp(raw)
            .map(Self::new)
            .ok_or_else(|| SynapseError::Validation(format!("Unrecognized timestamp '{}'", raw)))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.at
    }
}
