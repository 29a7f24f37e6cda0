use std::path::PathBuf;

use crate::client::DEFAULT_API_URL;
use crate::preferences::FileStore;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

pub const API_URL_VAR: &str = "GITHUB_API_URL";
pub const PREFERENCES_VAR: &str = "GITHUB_PROFILE_PREFERENCES";

/// Startup settings, read from the environment (and `.env`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_url: String,
    /// `None` when the platform has no config dir and no override is set;
    /// preferences then only last for the session.
    pub preferences_path: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            api_url: var(API_URL_VAR).unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            preferences_path: var(PREFERENCES_VAR)
                .map(PathBuf::from)
                .or_else(FileStore::default_path),
        }
    }
}
