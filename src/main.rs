use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod core;
mod monitor;
mod providers;
mod stats;

use crate::core::{items, settings, store};

#[derive(Parser)]
#[command(name = "workshop-stats")]
#[command(author, version, about = "Steam Workshop statistics monitor")]
struct Cli {
    #[command(flatten)]
    paths: PathArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct PathArgs {
    /// Config file with apiKey and userId (JSON, or TOML by extension)
    #[arg(long, global = true, default_value_os_t = settings::default_config_path())]
    config: PathBuf,

    /// Tracked Workshop item ids, one per line
    #[arg(long, global = true, default_value_os_t = items::default_items_path())]
    items: PathBuf,

    /// Snapshot of the last observed stats
    #[arg(long, global = true, default_value_os_t = store::default_snapshot_path())]
    snapshot: PathBuf,
}

impl From<PathArgs> for cli::AppPaths {
    fn from(args: PathArgs) -> Self {
        Self {
            config: args.config,
            items: args.items,
            snapshot: args.snapshot,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the summary and baseline report, then watch for changes (default)
    Monitor,

    /// Print totals and the most popular items
    Summary {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the baseline report against the last session and save the snapshot
    Baseline,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = cli::AppPaths::from(cli.paths);

    match cli.command.unwrap_or(Commands::Monitor) {
        Commands::Monitor => {
            init_logging();
            cli::monitor::run(&paths).await
        }
        Commands::Summary { json } => {
            init_logging();
            cli::summary::run(&paths, json).await
        }
        Commands::Baseline => {
            init_logging();
            cli::baseline::run(&paths).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}
