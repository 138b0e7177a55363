use serde::Serialize;
use stockdash_core::{duration_catalog, Market};

use super::CommandOutput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MarketEntry {
    pub code: Market,
    pub provider_suffix: &'static str,
}

pub fn durations() -> CommandOutput {
    CommandOutput::Durations {
        durations: duration_catalog(),
    }
}

pub fn markets() -> CommandOutput {
    CommandOutput::Markets {
        markets: Market::ALL
            .into_iter()
            .map(|code| MarketEntry {
                code,
                provider_suffix: code.provider_suffix(),
            })
            .collect(),
    }
}
