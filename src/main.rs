// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Print the usage text and stop if URL or selector is missing
// 3. Set up logging (stderr, so stdout only carries the report)
// 4. Check the page's links and print the report
//
// Exit codes:
//   0 = a report was printed (whatever it says) or usage was shown
//   2 = unexpected internal error (e.g. stdout closed)
// =============================================================================

mod checker; // src/checker/ - link extraction and checking
mod cli; // src/cli.rs - command-line parsing
mod report; // src/report.rs - text report

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use cli::Cli;
use std::io::Write;
use tracing_subscriber::EnvFilter;

// Every request is awaited before the next one starts, so a single-threaded
// runtime is all we need
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let exit_code = match run().await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    let Some((url, selector)) = cli.target() else {
        Cli::command()
            .print_help()
            .context("failed to print usage")?;
        return Ok(());
    };

    init_logging(cli.verbose);

    let client = checker::build_client()?;
    let set = checker::check_page(&client, &cli.title, url, selector).await;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::write_report(&mut out, &set).context("failed to write report")?;
    out.flush().context("failed to write report")?;

    Ok(())
}

// RUST_LOG wins when set; otherwise -v / -vv raise the default level
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
