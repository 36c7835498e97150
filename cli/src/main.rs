//! TickTick CLI
//!
//! Scriptable subject/action interface over the unified client. One JSON
//! line per invocation on stdout; diagnostics go to stderr so output stays
//! machine-parseable.

mod args;
mod commands;
mod dates;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use args::{Cli, Commands};

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("ticktick={0},ticktick_sdk={0}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Tasks { action } => commands::tasks::run(action).await,
        Commands::Projects { action } => commands::projects::run(action).await,
        Commands::Tags { action } => commands::tags::run(action).await,
        Commands::Folders { action } => commands::folders::run(action).await,
        Commands::Columns { action } => commands::columns::run(action).await,
        Commands::Auth { action } => commands::auth::run(action),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
