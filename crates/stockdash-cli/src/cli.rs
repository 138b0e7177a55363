//! CLI argument definitions for stockdash.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `fetch` | Download full history, cache it, show a window |
//! | `show` | Show a window from the cached file |
//! | `durations` | List duration labels |
//! | `markets` | List supported markets |
//! | `interactive` | Line-oriented dashboard session |
//!
//! # Examples
//!
//! ```bash
//! stockdash fetch RELIANCE --market NSE
//! stockdash show RELIANCE --duration YTD --format json --pretty
//! stockdash --mock interactive
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Stock price dashboard for the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "stockdash",
    author,
    version,
    about = "Fetch, cache and summarize daily stock prices",
    long_about = "stockdash downloads the full daily price history of a ticker, caches it \
as <TICKER>_data.json and shows summary statistics plus a closing-price chart \
for a chosen window (1D, 5D, 1W, 1M, YTD, 1Y, 3Y, Max)."
)]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Use deterministic offline data instead of Yahoo Finance.
    #[arg(long, global = true, default_value_t = false)]
    pub mock: bool,

    /// Path to a stockdash.toml configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory for cached <TICKER>_data.json files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log file path (defaults to the configured log file).
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// HTTP request timeout in milliseconds.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables and a text chart.
    Table,
    /// Single JSON object.
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch full daily history, cache it and show a window.
    ///
    /// # Examples
    ///
    ///   stockdash fetch AAPL --market NASDAQ
    ///   stockdash fetch TCS --market NSE --duration 1M
    Fetch(FetchArgs),

    /// Show a window from the cached history of a ticker.
    ///
    /// # Examples
    ///
    ///   stockdash show AAPL --duration YTD
    Show(ShowArgs),

    /// List the available duration labels.
    Durations,

    /// List the supported market codes.
    Markets,

    /// Start an interactive session (fetch, duration, show, quit).
    Interactive,
}

#[derive(Debug, Args)]
pub struct FetchArgs {
    /// Ticker symbol, without market suffix.
    pub ticker: String,

    /// Market code (NSE, BSE, NYSE, NASDAQ). Defaults to the configured market.
    #[arg(long)]
    pub market: Option<String>,

    /// Duration label. Defaults to the configured duration.
    #[arg(long)]
    pub duration: Option<String>,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Ticker symbol whose cached history should be shown.
    pub ticker: String,

    /// Duration label. Defaults to the configured duration.
    #[arg(long)]
    pub duration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fetch_with_global_flags() {
        let cli = Cli::try_parse_from([
            "stockdash", "fetch", "tcs", "--market", "NSE", "--format", "json", "--mock",
        ])
        .expect("must parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.mock);
        let Command::Fetch(args) = cli.command else {
            panic!("expected fetch");
        };
        assert_eq!(args.ticker, "tcs");
        assert_eq!(args.market.as_deref(), Some("NSE"));
        assert_eq!(args.duration, None);
    }

    #[test]
    fn defaults_to_table_output() {
        let cli = Cli::try_parse_from(["stockdash", "durations"]).expect("must parse");
        assert_eq!(cli.format, OutputFormat::Table);
        assert!(matches!(cli.command, Command::Durations));
    }
}
