mod cli;
mod error;
mod fetch;
mod poll;
mod view;
mod watch;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::cli::Commands;
use crate::error::CliError;
use crate::fetch::client::DashboardClient;

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{error}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let client = DashboardClient::new(Duration::from_secs(cli.timeout_secs))?;

    match cli.command {
        Commands::Render(args) => view::render(args, &client),
        Commands::Watch(args) => watch::watch(args, client),
        Commands::Check(args) => watch::check(args, &client),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
