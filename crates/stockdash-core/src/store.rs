//! Local JSON cache of fetched series.
//!
//! Each ticker is stored as `<TICKER>_data.json`: a JSON array with one
//! `{date, open, high, low, close, volume}` record per session.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind as IoErrorKind};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::{DashboardError, PriceSeries, Ticker};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesStore {
    data_dir: PathBuf,
}

impl SeriesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_for(&self, ticker: &Ticker) -> PathBuf {
        self.data_dir.join(format!("{}_data.json", ticker.as_str()))
    }

    /// Write the series for `ticker`, replacing any previous file.
    pub fn persist(&self, series: &PriceSeries, ticker: &Ticker) -> Result<PathBuf, DashboardError> {
        let path = self.path_for(ticker);
        match self.write_records(series, &path) {
            Ok(()) => {
                log::info!("Stock data saved successfully for ticker: {ticker}");
                Ok(path)
            }
            Err(error) => {
                log::error!("Error occurred while saving data to JSON: {error}");
                Err(error)
            }
        }
    }

    /// Read a previously persisted series. `Ok(None)` when nothing is cached.
    pub fn load(&self, ticker: &Ticker) -> Result<Option<PriceSeries>, DashboardError> {
        let path = self.path_for(ticker);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(error) if error.kind() == IoErrorKind::NotFound => return Ok(None),
            Err(error) => {
                log::error!("Error occurred while reading {}: {error}", path.display());
                return Err(io_error("read", &path, &error));
            }
        };

        let series = serde_json::from_reader(BufReader::new(file)).map_err(|error| {
            log::error!("Error occurred while parsing {}: {error}", path.display());
            DashboardError::unexpected(format!(
                "failed to parse cached series {}: {error}",
                path.display()
            ))
        })?;
        Ok(Some(series))
    }

    /// Stage the records in a temporary file next to the cache file, then
    /// rename it into place. An existing cache is never truncated.
    fn write_records(&self, series: &PriceSeries, path: &Path) -> Result<(), DashboardError> {
        let dir = if self.data_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            self.data_dir.as_path()
        };
        fs::create_dir_all(dir).map_err(|error| io_error("create", dir, &error))?;

        let staged = NamedTempFile::new_in(dir).map_err(|error| io_error("create", dir, &error))?;
        let mut writer = BufWriter::new(staged);
        serde_json::to_writer(&mut writer, series).map_err(|error| {
            DashboardError::unexpected(format!("failed to serialize {}: {error}", path.display()))
        })?;
        let staged = writer
            .into_inner()
            .map_err(|error| io_error("write", path, error.error()))?;

        staged
            .persist(path)
            .map_err(|error| io_error("replace", path, &error.error))?;
        Ok(())
    }
}

fn io_error(action: &str, path: &Path, error: &std::io::Error) -> DashboardError {
    DashboardError::unexpected(format!("failed to {action} {}: {error}", path.display()))
}
