use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use labor_summary::cli::{Cli, run};

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn execute(cli: &Cli) -> Result<()> {
    let today = Local::now().date_naive();
    let outcome = run(cli, today).context("failed to build labor summary")?;

    if cli.json {
        let json = serde_json::to_string_pretty(&outcome.summary)
            .context("failed to serialize labor summary")?;
        println!("{json}");
    } else {
        println!("Wrote {}", outcome.output.display());
    }
    Ok(())
}

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match execute(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
