use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use leo_probe::{Cli, probe};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = cli
        .resolve_config()
        .and_then(|config| probe::run(&config));

    match result {
        Ok(report) => {
            if let Err(e) = probe::report(std::io::stdout().lock(), &report, cli.format) {
                error!("failed to write result: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            debug!(code = e.exit_code(), "probe failed");
            eprintln!("{}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
