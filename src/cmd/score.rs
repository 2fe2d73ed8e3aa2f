use crate::reports;
use clap::Args;
use std::fs;
use synapse::clock::Clock;
use synapse::config::Config;
use synapse::history::HistoryStore;
use synapse::scorer;
use synapse::{Partition, SynResult, SynapseError};
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct ScoreArgs {
    #[command(flatten)]
    pub config: Config,

    /// JSON file holding a partition, e.g. [["a@x.com","b@x.com"]]
    #[arg(short, long)]
    pub partition: String,
}

pub fn run(args: &ScoreArgs, config: &Config, clock: &dyn Clock) -> SynResult<()> {
    let content = fs::read_to_string(&args.partition)?;
    let partition: Partition = serde_json::from_str(&content)?;

    if let Some(bad) = partition.iter().find(|g| g.len() < 2) {
        return Err(SynapseError::Validation(format!(
            "Group {:?} has fewer than two members",
            bad
        )));
    }

    let history = HistoryStore::new(&config.sources.history).load_entries(clock)?;
    info!("📜 Scoring against {} history entries", history.len());

    let details = scorer::score_details(&partition, &history);
    reports::print_pairing_table(&args.partition, &details);
    Ok(())
}
