use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use std::process;
use synapse::clock::SystemClock;
use synapse::config::Config;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about = "Pairs people up for one-on-ones, avoiding recent repeats.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; environment and flags override it
    #[arg(global = true, long)]
    config: Option<String>,

    /// Only print warnings, errors and the result table
    #[arg(global = true, short, long, default_value_t = false)]
    quiet: bool,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Read the roster, pick pairs, then optionally notify and record them
    Pair(cmd::pair::PairArgs),
    /// Score an explicit partition against the history
    Score(cmd::score::ScoreArgs),
}

fn init_logging(quiet: bool, debug: bool) {
    let level = if debug {
        Level::DEBUG
    } else if quiet {
        Level::WARN
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    init_logging(cli.quiet, cli.debug);

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Pair(args) => (&args.config, matches.subcommand_matches("pair")),
        Commands::Score(args) => (&args.config, matches.subcommand_matches("score")),
    };
    let Some(sub_matches) = sub_matches else {
        error!("Missing subcommand arguments");
        process::exit(2);
    };

    let config = Config::resolve(cli_config, sub_matches, cli.config.as_deref(), |key| {
        std::env::var(key).ok()
    })
    .unwrap_or_else(|e| {
        error!("❌ {}", e);
        process::exit(1);
    });

    info!("🚀 synapse {}", env!("CARGO_PKG_VERSION"));

    let clock = SystemClock;
    let outcome = match &cli.command {
        Commands::Pair(args) => cmd::pair::run(args, &config, &clock),
        Commands::Score(args) => cmd::score::run(args, &config, &clock),
    };

    if let Err(e) = outcome {
        error!("❌ {}", e);
        process::exit(1);
    }
}
