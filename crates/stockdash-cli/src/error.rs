use stockdash_core::{ConfigError, DashboardError, ErrorKind};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", describe(.0))]
    Dashboard(#[from] DashboardError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Dashboard(error) => match error.kind() {
                ErrorKind::InvalidInput => 2,
                ErrorKind::Unexpected => 1,
            },
            Self::Config(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}

impl From<stockdash_core::ValidationError> for CliError {
    fn from(value: stockdash_core::ValidationError) -> Self {
        Self::Dashboard(value.into())
    }
}

/// User-facing text: invalid input is shown as is, anything else generically.
pub fn describe(error: &DashboardError) -> String {
    match error.kind() {
        ErrorKind::InvalidInput => error.message().to_owned(),
        ErrorKind::Unexpected => format!("An unexpected error occurred: {}", error.message()),
    }
}
