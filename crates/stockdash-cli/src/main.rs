mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use stockdash_core::Config;

use crate::cli::Cli;
use crate::commands::AppContext;
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::from(error.exit_code())
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = Config::resolve(cli.config.as_deref())?;

    // An empty --log-file, like an empty config value, means stderr.
    let log_file = match cli.log_file.as_deref() {
        Some(path) if path.as_os_str().is_empty() => None,
        Some(path) => Some(path),
        None => config.general.log_path(),
    };
    logging::init(log_file);

    let ctx = AppContext::new(&cli, config);
    log::info!("using {} price source", ctx.source.name());

    commands::run(&cli, &ctx).await
}
