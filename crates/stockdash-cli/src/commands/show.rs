use stockdash_core::{DashboardError, LoadedSeries, Ticker};

use crate::cli::ShowArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput};

pub fn run(args: &ShowArgs, ctx: &AppContext) -> Result<CommandOutput, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;

    let mut session = ctx.new_session();
    if let Some(raw) = &args.duration {
        session.select_duration(raw)?;
    }

    let series = ctx.store.load(&ticker)?.ok_or_else(|| {
        DashboardError::invalid_input(format!(
            "No cached data for ticker: {ticker}. Run `stockdash fetch {ticker}` first."
        ))
    })?;
    session.load(LoadedSeries {
        ticker,
        market: None,
        series,
    });

    CommandOutput::from_session(&session)
}
