//! wingup - Policy-driven winget auto-updater CLI tool
//!
//! Lists the applications winget can upgrade, keeps the ones the policy
//! allows and upgrades them one at a time.

use clap::Parser;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;
use tracing::debug;
use wingup::cli::CliArgs;
use wingup::logging;
use wingup::output::{create_formatter, OutputConfig};
use wingup::runner::Upgrader;
use wingup::winget::{Winget, WINDOWS_APPS_DIR};

#[tokio::main]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    logging::init_tracing(args.debug);

    match run(args).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
async fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    let policy = args.policy()?;
    debug!(?policy, "upgrade policy");

    let winget = match &args.winget {
        Some(path) => Winget::new(path.clone()),
        None => Winget::locate(Path::new(WINDOWS_APPS_DIR))?,
    };
    debug!(executable = %winget.executable().display(), "using winget");

    let upgrader = Upgrader::new(winget, policy)
        .with_dry_run(args.dry_run())
        .with_progress(args.show_progress());
    let report = upgrader.run().await?;

    // Output results
    let mut stdout = io::stdout().lock();
    let config = OutputConfig::from_cli(args.json, args.quiet, args.debug)
        .with_color(args.color(stdout.is_terminal()));
    let formatter = create_formatter(config);
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    if report.has_failures() {
        // Partial success - some upgrades failed
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
