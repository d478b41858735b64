//! Main Entrypoint for the Dialer
//!
//! This binary is responsible for:
//! 1. Parsing the command line and loading configuration from the environment.
//! 2. Initializing logging.
//! 3. Building the provider client and the call request.
//! 4. Placing the call once and reporting the result on stdout.

use anyhow::Context;
use clap::Parser;
use dialer::{cli::Cli, config::Config, dial, report};
use std::io::Write;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --- 1. Load Configuration ---
    let config = Config::from_env_with(&cli.overrides()).context("Failed to load configuration")?;

    // --- 2. Initialize Logging ---
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    // --- 3. Build the Request ---
    let placer = dial::build_placer(&config).context("Failed to select provider")?;
    let request = dial::call_request(&config, placer.as_ref())
        .context("Failed to build call request")?;
    info!(
        provider = placer.provider(),
        to = %request.to,
        stream_url = ?request.stream_url,
        "Configuration loaded."
    );

    let mut stdout = std::io::stdout().lock();

    if cli.dry_run {
        let outbound = placer
            .prepare(&request)
            .context("Failed to prepare call request")?;
        writeln!(stdout, "{}", outbound).context("Failed to write request")?;
        return Ok(());
    }

    // --- 4. Place the Call ---
    let result = placer.place_call(&request);
    report::write_report(&mut stdout, &result).context("Failed to write report")?;

    Ok(())
}
