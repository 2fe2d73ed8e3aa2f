use crate::reports;
use clap::Args;
use std::io::{self, BufRead, Write};
use std::time::Duration;
use synapse::clock::Clock;
use synapse::config::Config;
use synapse::history::HistoryStore;
use synapse::notify::{self, MessageTemplate};
use synapse::optimizer::{Optimizer, PairingOptions, ProgressCallback};
use synapse::roster;
use synapse::scorer;
use synapse::{Partition, SynResult};
use tracing::{debug, info, warn};

#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    #[command(flatten)]
    pub config: Config,

    /// Just read and match, do not send anything
    #[arg(long, default_value_t = false, conflicts_with = "send")]
    pub no_send: bool,

    /// Send without asking for confirmation
    #[arg(long, default_value_t = false)]
    pub send: bool,
}

struct CliLogger;
impl ProgressCallback for CliLogger {
    fn on_improvement(&self, sample: usize, score: u64, _best: &Partition) -> bool {
        debug!("Sample {:6} | New Best: {}", sample, score);
        true
    }
}

fn confirm(group_count: usize) -> SynResult<bool> {
    print!("Send {} messages? [y/N] ", group_count);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

pub fn run(args: &PairArgs, config: &Config, clock: &dyn Clock) -> SynResult<()> {
    let pattern = roster::compile_pattern(&config.sources.email_pattern)?;
    let identifiers = roster::load_roster(
        &config.sources.roster,
        &config.sources.roster_column,
        &pattern,
    )?;
    info!("👥 {} participants from {}", identifiers.len(), config.sources.roster);

    let store = HistoryStore::new(&config.sources.history);
    let history = store.load_entries(clock)?;
    info!("📜 {} history entries", history.len());

    let options = PairingOptions::from(config);
    info!(
        "🎲 Sampling {} partitions{}",
        options.sample_count,
        if options.parallel { " in parallel" } else { "" }
    );
    let result = Optimizer::new(options).run_with_callback(&identifiers, &history, &CliLogger);

    if result.partition.is_empty() {
        warn!("Need at least two participants to pair. Nothing to do.");
        return Ok(());
    }

    let details = scorer::score_details(&result.partition, &history);
    reports::print_pairing_table("PAIRINGS", &details);

    if args.no_send {
        info!("--no-send given. Not sending or recording anything.");
        return Ok(());
    }

    let template = MessageTemplate::from_params(&config.notify)?;

    if !args.send && !confirm(result.partition.len())? {
        info!("Aborted. Nothing sent.");
        return Ok(());
    }

    let mut notifier = notify::build_notifier(&config.notify);
    let report = notify::send_all(
        notifier.as_mut(),
        &result.partition,
        &template,
        Duration::from_millis(config.notify.send_delay_ms),
    );

    if report.failed > 0 {
        warn!("⚠️  {} of {} messages failed.", report.failed, result.partition.len());
    }

    if !notifier.records_history() {
        info!(
            "{} transport only logs messages. History left unchanged.",
            config.notify.transport
        );
    } else if report.sent > 0 {
        let record = store.append(&result.partition, clock)?;
        info!(
            "💾 Recorded pairing at {} in {}",
            synapse::history::format_timestamp(record.timestamp),
            store.path().display()
        );
    } else {
        warn!("No messages delivered. History left unchanged.");
    }

    Ok(())
}
