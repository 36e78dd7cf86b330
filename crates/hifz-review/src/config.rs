use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;

/// Prefix shared by every configuration variable.
pub const ENV_PREFIX: &str = "HIFZ_";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

/// Configuration read from `HIFZ_*` environment variables.
///
/// * `HIFZ_ENV` - `development` (default) or `production`
/// * `HIFZ_HISTORY_PATH` - JSON file holding the exported revision rows
/// * `HIFZ_TODAY` - overrides the current date (`YYYY-MM-DD`)
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ReviewConfig {
    #[serde(default)]
    pub env: Environment,
    pub history_path: Option<PathBuf>,
    pub today: Option<NaiveDate>,
}

impl ReviewConfig {
    pub fn from_env() -> Result<Self, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_env()
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX).from_iter(vars)
    }

    /// The configured date, or the local calendar date when none is set.
    pub fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}
