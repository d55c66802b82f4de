use crate::models::{ScenarioInputs, parse_finite};
use crate::storage::resolve_data_path;
use std::{env, path::PathBuf};

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub scenario: ScenarioInputs,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            port,
            data_path: resolve_data_path(lookup("APP_DATA_PATH")),
            scenario: ScenarioInputs {
                price: lookup("REPORT_PRICE").as_deref().and_then(parse_finite),
                attach: lookup("REPORT_ATTACH").as_deref().and_then(parse_finite),
            },
        }
    }
}
