mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "feedsync")]
#[command(about = "Build the shopping feed from the Shopify catalog and publish it")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalog, write the feed, and push it (the default)
    Run(RunArgs),
}

#[derive(Debug, Default, Args)]
pub(crate) struct RunArgs {
    /// Write the feed here instead of `FEEDSYNC_OUTPUT_PATH`
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write the feed file but skip the git commit and push
    #[arg(long)]
    no_publish: bool,

    /// Fetch and transform only; write nothing
    #[arg(long, conflicts_with_all = ["output", "no_publish"])]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = feedsync_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let args = match cli.command {
        Some(Commands::Run(args)) => args,
        None => RunArgs::default(),
    };
    run::run_pipeline(&config, &args).await
}
