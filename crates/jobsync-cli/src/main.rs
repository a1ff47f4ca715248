mod adapter;
mod ingest;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jobsync_core::JobSource;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jobsync-cli")]
#[command(about = "Reconcile job board feeds against the company directory")]
struct Cli {
    /// Log at debug level regardless of `JOBSYNC_LOG_LEVEL`.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Reconcile one source's candidates, then expire its unseen listings.
    Ingest {
        /// stackoverflow, dice, indeed or ziprecruiter
        #[arg(long)]
        source: JobSource,
        /// JSON array of candidate postings.
        #[arg(long)]
        input: PathBuf,
        /// Narrows the fetch; for indeed, a company location id.
        #[arg(long)]
        partition: Option<String>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Disable listings of a source that have not been seen recently.
    Expire {
        #[arg(long)]
        source: JobSource,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = jobsync_core::load_app_config()?;

    let env_filter = if cli.verbose {
        EnvFilter::try_new("debug")?
    } else {
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&config.log_level))?
    };
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Ingest {
            source,
            input,
            partition,
            dry_run,
        } => {
            let summary =
                ingest::run_ingest(&config, source, &input, partition.as_deref(), dry_run)?;
            ingest::print_summary(&summary, dry_run);
        }
        Commands::Expire { source } => {
            let disabled = ingest::run_expire(&config, source)?;
            println!("disabled {disabled} stale {source} listings");
        }
    }

    Ok(())
}
