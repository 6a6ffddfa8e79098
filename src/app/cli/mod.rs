//! CLI Adapter.

use std::io::IsTerminal;
use std::path::Path;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, SyncOutcome};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "oncall-sync")]
#[command(version)]
#[command(
    about = "Assign the Trello on-call card member as PagerDuty on-call for the next 24 hours",
    long_about = None
)]
struct Cli {
    /// Turn the noise on
    #[arg(long)]
    debug: bool,
    /// Path to configuration file
    #[arg(long = "configfile", value_name = "PATH", default_value = "pagerduty.cfg")]
    config_file: String,
    /// Path to API token and key file
    #[arg(long = "tokenfile", value_name = "PATH", default_value = ".token")]
    token_file: String,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    match run_sync(&cli) {
        Ok(outcome) => {
            let resolution = outcome.resolution();
            info!(
                schedule_id = %resolution.schedule_id,
                user_id = %resolution.board_user_id,
                "On-call sync finished"
            );
        }
        Err(e) => {
            error!("On-call sync failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_sync(cli: &Cli) -> Result<SyncOutcome, AppError> {
    let settings = api::load_settings(Path::new(&cli.config_file), Path::new(&cli.token_file))?;
    api::sync_on_call(&settings)
}

fn init_logging(debug: bool) {
    let mut filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();
    if debug {
        // Only this crate: HTTP client internals log full URLs, which carry Trello credentials.
        let directive = "oncall_sync=debug".parse().expect("Directive must be valid");
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();
}
