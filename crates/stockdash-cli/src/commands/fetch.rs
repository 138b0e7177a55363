use stockdash_core::{DashboardError, DashboardSession, LoadedSeries, Market, Ticker};

use crate::cli::FetchArgs;
use crate::error::CliError;

use super::{AppContext, CommandOutput, CommandResult};

pub async fn run(args: &FetchArgs, ctx: &AppContext) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(&args.ticker)?;
    let market = ctx.market(args.market.as_deref())?;

    // Reject a bad label before spending a network round trip.
    let mut session = ctx.new_session();
    if let Some(raw) = &args.duration {
        session.select_duration(raw)?;
    }

    fetch_and_view(&mut session, ctx, ticker, market).await
}

/// Fetch into `session` and build the view; a failed save is deferred so
/// the fetched window is still shown.
pub(super) async fn fetch_and_view(
    session: &mut DashboardSession,
    ctx: &AppContext,
    ticker: Ticker,
    market: Market,
) -> Result<CommandResult, CliError> {
    let persist_error = fetch_into(session, ctx, ticker, market).await?;
    Ok(CommandResult {
        output: CommandOutput::from_session(session)?,
        deferred_error: persist_error.map(CliError::from),
    })
}

/// Fetch, load into the session, then persist.
///
/// A failed fetch leaves the session untouched and is returned as `Err`.
/// A failed save is returned as `Ok(Some(error))`: the series is loaded.
pub(super) async fn fetch_into(
    session: &mut DashboardSession,
    ctx: &AppContext,
    ticker: Ticker,
    market: Market,
) -> Result<Option<DashboardError>, DashboardError> {
    let series = ctx.source.fetch_series(&ticker, market).await?;
    session.load(LoadedSeries {
        ticker,
        market: Some(market),
        series,
    });

    Ok(session
        .loaded()
        .and_then(|loaded| ctx.store.persist(&loaded.series, &loaded.ticker).err()))
}
