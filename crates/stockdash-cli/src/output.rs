use std::io::Write;

use stockdash_core::{ChartSpec, DashboardView, WindowContent};

use crate::cli::OutputFormat;
use crate::commands::{CommandOutput, MarketEntry};
use crate::error::CliError;

/// Widest text chart, in columns.
const CHART_COLUMNS: usize = 60;
const SPARK_LEVELS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

pub fn render<W: Write>(
    writer: &mut W,
    output: &CommandOutput,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(output)?
            } else {
                serde_json::to_string(output)?
            };
            writeln!(writer, "{payload}")?;
        }
        OutputFormat::Table => render_table(writer, output)?,
    }

    Ok(())
}

fn render_table<W: Write>(writer: &mut W, output: &CommandOutput) -> Result<(), CliError> {
    match output {
        CommandOutput::Dashboard(view) => render_dashboard(writer, view)?,
        CommandOutput::Durations { durations } => {
            let rows = durations
                .iter()
                .map(|spec| vec![spec.label.as_str().to_owned(), spec.display_name.to_owned()])
                .collect::<Vec<_>>();
            write_table(writer, &["Label", "Duration"], &rows)?;
        }
        CommandOutput::Markets { markets } => {
            let rows = markets.iter().map(market_row).collect::<Vec<_>>();
            write_table(writer, &["Market", "Symbol suffix"], &rows)?;
        }
        CommandOutput::Message { message } => writeln!(writer, "{message}")?,
    }

    Ok(())
}

fn market_row(entry: &MarketEntry) -> Vec<String> {
    let suffix = if entry.provider_suffix.is_empty() {
        String::from("(none)")
    } else {
        entry.provider_suffix.to_owned()
    };
    vec![entry.code.as_str().to_owned(), suffix]
}

fn render_dashboard<W: Write>(writer: &mut W, view: &DashboardView) -> Result<(), CliError> {
    match view.market {
        Some(market) => writeln!(writer, "ticker  : {} ({market})", view.ticker)?,
        None => writeln!(writer, "ticker  : {} (cached)", view.ticker)?,
    }
    writeln!(writer, "duration: {}", view.duration)?;
    writeln!(writer, "sessions: {}", view.sessions)?;
    writeln!(writer)?;
    writeln!(writer, "{}", view.heading)?;

    match &view.content {
        WindowContent::Data { rows, chart, .. } => {
            let rows = rows
                .iter()
                .map(|row| vec![row.metric.to_owned(), row.value.clone()])
                .collect::<Vec<_>>();
            write_table(writer, &["Metric", "Value"], &rows)?;
            writeln!(writer)?;
            render_chart(writer, chart)?;
        }
        WindowContent::NoData { message } => writeln!(writer, "{message}")?,
    }

    Ok(())
}

fn render_chart<W: Write>(writer: &mut W, chart: &ChartSpec) -> Result<(), CliError> {
    let (Some(first), Some(last)) = (chart.data.first(), chart.data.last()) else {
        return Ok(());
    };

    match chart.y_domain() {
        Some(domain) => writeln!(
            writer,
            "{} ({:.2} .. {:.2})",
            chart.y.title, domain.min, domain.max
        )?,
        None => writeln!(writer, "{}", chart.y.title)?,
    }
    writeln!(writer, "{}", sparkline(chart))?;
    writeln!(writer, "{}: {} .. {}", chart.x.title, first.date, last.date)?;
    Ok(())
}

/// One glyph per sampled close, scaled into the chart's y domain.
fn sparkline(chart: &ChartSpec) -> String {
    let Some(domain) = chart.y_domain() else {
        return String::new();
    };
    let len = chart.data.len();
    let columns = len.min(CHART_COLUMNS);
    let height = domain.height();
    let top = SPARK_LEVELS.len() - 1;

    (0..columns)
        .map(|column| {
            let point = &chart.data[column * len / columns];
            let ratio = if height > 0.0 {
                (point.close - domain.min) / height
            } else {
                0.5
            };
            let level = (ratio * top as f64).round().clamp(0.0, top as f64) as usize;
            SPARK_LEVELS[level]
        })
        .collect()
}

fn write_table<W: Write>(
    writer: &mut W,
    headers: &[&str],
    rows: &[Vec<String>],
) -> Result<(), CliError> {
    let mut widths = headers.iter().map(|header| header.chars().count()).collect::<Vec<_>>();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_cells = headers.iter().map(|header| (*header).to_owned()).collect::<Vec<_>>();
    write_row(writer, &widths, &header_cells)?;
    let rule = widths.iter().map(|width| "-".repeat(*width)).collect::<Vec<_>>();
    write_row(writer, &widths, &rule)?;
    for row in rows {
        write_row(writer, &widths, row)?;
    }
    Ok(())
}

fn write_row<W: Write>(writer: &mut W, widths: &[usize], cells: &[String]) -> Result<(), CliError> {
    let line = widths
        .iter()
        .zip(cells)
        .map(|(width, cell)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(writer, "{}", line.trim_end())?;
    Ok(())
}
