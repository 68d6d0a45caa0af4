//! plansplit CLI entrypoint.
//!
//! Reads a change plan on stdin and writes the before/after trees.

use std::process::ExitCode;

use plansplit::cli::{Cli, OutputFormatter};
use plansplit::pipeline::Pipeline;

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entrypoint.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Initialize logging
    init_logging(cli.verbose);

    let config = cli.split_config();
    debug!(
        "Output directory: {}, address mode: {}",
        config.output_dir.display(),
        config.address_mode
    );

    match Pipeline::new(&config).run(std::io::stdin().lock()) {
        Ok(report) => {
            if !cli.quiet {
                let formatter = OutputFormatter::new(cli.output);
                eprintln!("{}", formatter.format_report(&report));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Initializes the logging system on stderr.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
