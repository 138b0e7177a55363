use std::io::{self, BufRead, Write};

use stockdash_core::{DashboardError, DashboardSession, ErrorKind, Ticker};

use crate::cli::OutputFormat;
use crate::error::{describe, CliError};
use crate::output;

use super::fetch::fetch_and_view;
use super::{catalog, AppContext, CommandOutput, CommandResult};

const PROMPT: &str = "stockdash> ";
const HELP: &str = "\
commands:
  fetch <TICKER> [MARKET]  fetch full history, cache it and show the selected window
  duration <LABEL>         select 1D, 5D, 1W, 1M, YTD, 1Y, 3Y or Max
  show                     redraw the current window
  durations                list duration labels
  markets                  list market codes
  help                     show this text
  quit                     leave the session";

pub async fn run(ctx: &AppContext, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_loop(ctx, stdin.lock(), stdout.lock(), format, pretty).await
}

/// Read commands line by line until `quit` or end of input.
///
/// Errors from a single command are printed and the session continues;
/// only failures to write to `out` end the loop.
pub async fn run_loop<R: BufRead, W: Write>(
    ctx: &AppContext,
    mut input: R,
    mut out: W,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    let mut session = ctx.new_session();
    let mut line = String::new();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            continue;
        };
        let args = words.collect::<Vec<_>>();

        let result: Result<CommandResult, CliError> = match command.to_ascii_lowercase().as_str() {
            "quit" | "exit" => return Ok(()),
            "help" => Ok(CommandOutput::message(HELP).into()),
            "durations" => Ok(catalog::durations().into()),
            "markets" => Ok(catalog::markets().into()),
            "show" => CommandOutput::from_session(&session).map(Into::into),
            "duration" => match args.as_slice() {
                [label] => match session.select_duration(label) {
                    Ok(_) => CommandOutput::from_session(&session).map(Into::into),
                    Err(error) => Err(error.into()),
                },
                _ => Err(usage("duration <LABEL>")),
            },
            "fetch" => match args.as_slice() {
                [ticker] => fetch(&mut session, ctx, ticker, None).await,
                [ticker, market] => fetch(&mut session, ctx, ticker, Some(*market)).await,
                _ => Err(usage("fetch <TICKER> [MARKET]")),
            },
            other => Err(DashboardError::invalid_input(format!(
                "Unknown command: {other}. Type `help` for a list."
            ))
            .into()),
        };

        match result {
            Ok(done) => {
                output::render(&mut out, &done.output, format, pretty)?;
                if let Some(error) = done.deferred_error {
                    report(&mut out, error)?;
                }
            }
            Err(error) => report(&mut out, error)?,
        }
    }
}

/// Print a command failure and keep the session alive; only output
/// failures are returned.
fn report<W: Write>(out: &mut W, error: CliError) -> Result<(), CliError> {
    match error {
        CliError::Dashboard(error) => {
            if error.kind() == ErrorKind::Unexpected {
                log::error!("{}: {}", error.code(), error.message());
            }
            writeln!(out, "{}", describe(&error))?;
            Ok(())
        }
        other => Err(other),
    }
}

async fn fetch(
    session: &mut DashboardSession,
    ctx: &AppContext,
    ticker: &str,
    market: Option<&str>,
) -> Result<CommandResult, CliError> {
    let ticker = Ticker::parse(ticker)?;
    let market = ctx.market(market)?;
    fetch_and_view(session, ctx, ticker, market).await
}

fn usage(text: &str) -> CliError {
    DashboardError::invalid_input(format!("usage: {text}")).into()
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use stockdash_core::{Config, FixtureSource, SeriesStore};
    use tempfile::tempdir;

    use super::*;

    async fn transcript(dir: &Path, script: &str) -> String {
        let ctx = AppContext::with_parts(
            Arc::new(FixtureSource::new(300).with_unlisted("GHOST")),
            SeriesStore::new(dir),
            Config::default(),
        );
        let mut out = Vec::new();
        run_loop(&ctx, script.as_bytes(), &mut out, OutputFormat::Table, false)
            .await
            .expect("session should end cleanly");
        String::from_utf8(out).expect("utf8")
    }

    #[tokio::test]
    async fn fetch_then_switch_duration() {
        let dir = tempdir().expect("tempdir");

        let text = transcript(dir.path(), "fetch reliance NSE\nduration 1M\nquit\n").await;

        assert!(text.contains("ticker  : RELIANCE (NSE)"));
        assert!(text.contains("Analytics for 5 Days"));
        assert!(text.contains("Analytics for 1 Month"));
        assert!(text.contains("sessions: 30"));
        assert!(dir.path().join("RELIANCE_data.json").is_file());
    }

    #[tokio::test]
    async fn errors_are_reported_and_session_continues() {
        let dir = tempdir().expect("tempdir");

        let text = transcript(
            dir.path(),
            "fetch AAPL LSE\nduration 2W\nfetch ghost NYSE\nbogus\nshow\n",
        )
        .await;

        assert!(text.contains("Invalid market selected: LSE"));
        assert!(text.contains("invalid duration '2W'"));
        assert!(text.contains("No data found for ticker: GHOST in market: NYSE"));
        assert!(text.contains("Unknown command: bogus"));
        assert!(text.contains("No data loaded. Fetch a ticker first."));
    }

    #[tokio::test]
    async fn blank_lines_and_eof_end_quietly() {
        let dir = tempdir().expect("tempdir");

        let text = transcript(dir.path(), "\n   \nmarkets\n").await;

        assert!(text.contains("NASDAQ"));
        assert!(text.ends_with('\n'));
    }

    #[tokio::test]
    async fn failed_save_still_shows_the_fetched_window() {
        // Given: a data directory that cannot be created
        let dir = tempdir().expect("tempdir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").expect("write");

        // When: a ticker is fetched and then redrawn
        let text = transcript(&blocker.join("nested"), "fetch AAPL NYSE\nshow\n").await;

        // Then: the window is rendered before the save error, and stays loaded
        let shown = text.find("Analytics for 5 Days").expect("window rendered");
        let failed = text
            .find("An unexpected error occurred:")
            .expect("save failure reported");
        assert!(shown < failed);
        assert_eq!(text.matches("ticker  : AAPL (NYSE)").count(), 2);
    }
}
