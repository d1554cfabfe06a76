//! Schema Pilot - a terminal chat that sketches database schemas.

use schema_pilot::cli::Cli;
use schema_pilot::config::Config;
use schema_pilot::error::Result;
use schema_pilot::identity::Identity;
use schema_pilot::{logging, tui};
use tracing::{error, info};

fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    if cli.is_headless() {
        logging::init_stderr_logging();
    } else {
        logging::init_file_logging();
    }

    match run(&cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("{}: {}", e.category(), e);
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<i32> {
    let config_path = cli.config_path();
    info!("Loading config from: {}", config_path.display());
    let mut config = Config::load_from_file(&config_path)?;
    config.apply_env_overrides()?;
    cli.apply_overrides(&mut config);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| {
        schema_pilot::error::PilotError::internal(format!("Failed to start runtime: {e}"))
    })?;

    if cli.is_headless() {
        return runtime.block_on(tui::headless::run_headless(cli, &config));
    }

    let identity = Identity::load_or_ephemeral(&Identity::default_path());
    info!("Running as user {}", identity.short());
    runtime.block_on(tui::run(&config, &identity))?;
    Ok(0)
}
