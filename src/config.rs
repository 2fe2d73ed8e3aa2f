use crate::consts::{DEFAULT_EMAIL_PATTERN, DEFAULT_SAMPLE_COUNT};
use crate::error::{SynResult, SynapseError};
use crate::notify::{Transport, DEFAULT_SUBJECT};
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

pub const ENV_ROSTER: &str = "SYNAPSE_ROSTER";
pub const ENV_HISTORY: &str = "SYNAPSE_HISTORY";
pub const ENV_SENDER: &str = "SYNAPSE_SENDER";
pub const ENV_EMAIL_PATTERN: &str = "SYNAPSE_EMAIL_PATTERN";

#[derive(Args, Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    #[command(flatten)]
    pub sources: SourceParams,
    #[command(flatten)]
    pub search: SearchParams,
    #[command(flatten)]
    pub notify: NotifyParams,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SourceParams {
    /// CSV file listing participants
    #[arg(long, default_value = "data/roster.csv")]
    pub roster: String,
    #[arg(long, default_value = "email")]
    pub roster_column: String,
    /// CSV file of previously sent pairings
    #[arg(long, default_value = "data/history.csv")]
    pub history: String,
    /// Only addresses matching this regex take part
    #[arg(long, default_value = DEFAULT_EMAIL_PATTERN)]
    pub email_pattern: String,
}

impl Default for SourceParams {
    fn default() -> Self {
        Self {
            roster: "data/roster.csv".to_string(),
            roster_column: "email".to_string(),
            history: "data/history.csv".to_string(),
            email_pattern: DEFAULT_EMAIL_PATTERN.to_string(),
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SearchParams {
    /// Random partitions to evaluate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_COUNT)]
    pub samples: usize,
    #[arg(short = 'S', long)]
    pub seed: Option<u64>,
    #[arg(long, default_value_t = false)]
    pub parallel: bool,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLE_COUNT,
            seed: None,
            parallel: false,
        }
    }
}

#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NotifyParams {
    #[arg(long, default_value_t = Transport::Outbox)]
    pub transport: Transport,
    #[arg(long, default_value = "data/outbox.jsonl")]
    pub outbox: String,
    #[arg(long, default_value = "")]
    pub sender: String,
    #[arg(long, default_value = DEFAULT_SUBJECT)]
    pub subject: String,
    /// Message body file with {names} and {emails} placeholders
    #[arg(long)]
    pub template: Option<String>,
    #[arg(long, default_value_t = 1000)]
    pub send_delay_ms: u64,
}

impl Default for NotifyParams {
    fn default() -> Self {
        Self {
            transport: Transport::Outbox,
            outbox: "data/outbox.jsonl".to_string(),
            sender: String::new(),
            subject: DEFAULT_SUBJECT.to_string(),
            template: None,
            send_delay_ms: 1000,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> SynResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SynapseError::Config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            SynapseError::Config(format!("Failed to parse config '{}': {}", path.display(), e))
        })
    }

    /// Overrides sources and sender from `lookup` (normally the process env).
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get(ENV_ROSTER) {
            self.sources.roster = v;
        }
        if let Some(v) = get(ENV_HISTORY) {
            self.sources.history = v;
        }
        if let Some(v) = get(ENV_EMAIL_PATTERN) {
            self.sources.email_pattern = v;
        }
        if let Some(v) = get(ENV_SENDER) {
            self.notify.sender = v;
        }
    }

    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Copies every value the user typed on the command line over `self`.
    pub fn merge_from_cli(&mut self, cli: &Config, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($section:ident . $field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$section.$field = cli.$section.$field.clone();
                }
            };
        }

        update_if_present!(sources.roster);
        update_if_present!(sources.roster_column);
        update_if_present!(sources.history);
        update_if_present!(sources.email_pattern);

        update_if_present!(search.samples);
        update_if_present!(search.seed);
        update_if_present!(search.parallel);

        update_if_present!(notify.transport);
        update_if_present!(notify.outbox);
        update_if_present!(notify.sender);
        update_if_present!(notify.subject);
        update_if_present!(notify.template);
        update_if_present!(notify.send_delay_ms);
    }

    /// Config file, then environment, then explicit command-line values.
    pub fn resolve(
        cli: &Config,
        matches: &ArgMatches,
        file: Option<&str>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> SynResult<Config> {
        let mut config = match file {
            Some(path) => {
                debug!("Loading config from {}", path);
                Config::load_from_file(path)?
            }
            None => Config::default(),
        };
        config.apply_env_with(lookup);
        config.merge_from_cli(cli, matches);
        Ok(config)
    }
}
