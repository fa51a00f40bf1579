use anyhow::Context;
use clap::Parser;
use mint2monarch::args::Args;
use mint2monarch::commands;
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub fn main_inner(args: Args) -> anyhow::Result<()> {
    trace!("{args:?}");
    let input = args.input_file();

    // The helper replaces the normal run, the user has to edit it before converting.
    if let Some(helper) = args.account_mapping_helper() {
        commands::mapping_helper(input, helper)
            .context("Unable to create the account mapping helper file")?
            .print();
        return Ok(());
    }

    commands::convert(
        input,
        args.output_dir().path(),
        args.account_mapping_translate(),
        args.max_rows(),
        args.dry_run(),
    )
    .with_context(|| format!("Unable to convert {}", input.display()))?
    .print();
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
