use std::fs::OpenOptions;
use std::path::Path;

use log::LevelFilter;

/// Install the global logger.
///
/// Workspace crates log at `info`, dependencies at `warn`; `RUST_LOG`
/// overrides both. Output goes to `log_file` when it can be opened,
/// stderr otherwise.
pub fn init(log_file: Option<&Path>) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, LevelFilter::Warn)
        .filter(Some("stockdash"), LevelFilter::Info)
        .filter(Some("stockdash_core"), LevelFilter::Info)
        .parse_default_env();

    if let Some(path) = log_file {
        match OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(error) => {
                eprintln!("warning: cannot open log file {}: {error}", path.display());
            }
        }
    }

    // A logger may already be installed (tests); keep the first one.
    let _ = builder.try_init();
}
