mod commands;
mod config;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::config::{Cli, Command};

const DEFAULT_LOG_FILTER: &str = "warn,cards=info,storage=info,services=info";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    // stdout belongs to the quiz.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let source = cli.source.resolve()?;
    tracing::debug!(?source, group_by = %cli.group_by, "configured");

    match cli.command.unwrap_or(Command::Play) {
        Command::Play => {
            commands::play::execute(&source, cli.group_by, &cli.play_settings()).await
        }
        Command::Groups => commands::groups::execute(&source, cli.group_by).await,
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        // Binary glue: report once.
        eprintln!("Error: {err:#}");
        std::process::exit(2);
    }
}
