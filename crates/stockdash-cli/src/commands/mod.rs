mod catalog;
mod fetch;
pub mod interactive;
mod show;

use std::io;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use stockdash_core::{
    Config, DashboardError, DashboardSession, DashboardView, DurationSpec, FixtureSource, Market,
    PriceSource, ReqwestHttpClient, SeriesStore, YahooAdapter,
};

use crate::cli::{Cli, Command};
use crate::error::CliError;
use crate::output;

pub use catalog::MarketEntry;

/// Collaborators shared by every command.
pub struct AppContext {
    pub source: Arc<dyn PriceSource>,
    pub store: SeriesStore,
    pub config: Config,
}

impl AppContext {
    pub fn new(cli: &Cli, config: Config) -> Self {
        let timeout_ms = cli.timeout_ms.unwrap_or(config.http.timeout_ms);
        let source: Arc<dyn PriceSource> = if cli.mock {
            Arc::new(FixtureSource::default())
        } else {
            let client = ReqwestHttpClient::with_user_agent(&config.http.user_agent);
            Arc::new(YahooAdapter::with_http_client(Arc::new(client)).with_timeout_ms(timeout_ms))
        };
        let data_dir = cli
            .data_dir
            .clone()
            .unwrap_or_else(|| config.general.data_dir.clone());

        Self {
            source,
            store: SeriesStore::new(data_dir),
            config,
        }
    }

    #[cfg(test)]
    pub fn with_parts(source: Arc<dyn PriceSource>, store: SeriesStore, config: Config) -> Self {
        Self {
            source,
            store,
            config,
        }
    }

    pub fn new_session(&self) -> DashboardSession {
        DashboardSession::new(self.config.general.default_duration)
    }

    /// Parse `raw`, falling back to the configured default market.
    pub fn market(&self, raw: Option<&str>) -> Result<Market, DashboardError> {
        match raw {
            Some(raw) => Ok(Market::from_str(raw)?),
            None => Ok(self.config.general.default_market),
        }
    }
}

/// Result of a one-shot command, rendered by [`crate::output`].
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CommandOutput {
    Dashboard(DashboardView),
    Durations { durations: Vec<DurationSpec> },
    Markets { markets: Vec<MarketEntry> },
    Message { message: String },
}

impl CommandOutput {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message {
            message: message.into(),
        }
    }

    pub fn from_session(session: &DashboardSession) -> Result<Self, CliError> {
        Ok(match session.view()? {
            Some(view) => Self::Dashboard(view),
            None => Self::message("No data loaded. Fetch a ticker first."),
        })
    }
}

/// Output to show, plus an error to report once it is shown.
#[derive(Debug)]
pub struct CommandResult {
    pub output: CommandOutput,
    /// Set when the command partly succeeded, e.g. a fetch whose save failed.
    pub deferred_error: Option<CliError>,
}

impl From<CommandOutput> for CommandResult {
    fn from(output: CommandOutput) -> Self {
        Self {
            output,
            deferred_error: None,
        }
    }
}

/// Run the selected command and render its output to stdout.
pub async fn run(cli: &Cli, ctx: &AppContext) -> Result<(), CliError> {
    let result = match &cli.command {
        Command::Interactive => return interactive::run(ctx, cli.format, cli.pretty).await,
        Command::Fetch(args) => fetch::run(args, ctx).await?,
        Command::Show(args) => show::run(args, ctx)?.into(),
        Command::Durations => catalog::durations().into(),
        Command::Markets => catalog::markets().into(),
    };

    output::render(&mut io::stdout().lock(), &result.output, cli.format, cli.pretty)?;
    match result.deferred_error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
