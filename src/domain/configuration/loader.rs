//! Flat `key=value` configuration loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::domain::AppError;

/// Value every required key holds until a configuration file overwrites it.
pub const PLACEHOLDER: &str = "overwrite";

pub const TRELLO_APP_KEY: &str = "trelloAppKey";
pub const TRELLO_TOKEN: &str = "trelloToken";
pub const TRELLO_USER_NAME: &str = "trelloUserName";
pub const TRELLO_CARD_ID: &str = "trelloCardID";
pub const PAGERDUTY_TOKEN: &str = "pgtoken";
pub const PAGERDUTY_SCHEDULE_NAME: &str = "pdScheduleName";
pub const PAGERDUTY_TIME_ZONE: &str = "pdTimeZone";
pub const PAGERDUTY_IDENTITY_FIELD: &str = "pdIdentityField";
pub const TRELLO_API_URL: &str = "trelloApiUrl";
pub const PAGERDUTY_API_URL: &str = "pdApiUrl";
pub const HTTP_TIMEOUT_SECS: &str = "httpTimeoutSecs";

/// Keys that must be given a real value before a sync can run.
pub const REQUIRED_KEYS: [&str; 5] =
    [TRELLO_APP_KEY, TRELLO_TOKEN, TRELLO_CARD_ID, PAGERDUTY_TOKEN, PAGERDUTY_SCHEDULE_NAME];

/// Seeded with the placeholder like the required keys, but never needed by a run.
const OPTIONAL_PLACEHOLDER_KEYS: [&str; 1] = [TRELLO_USER_NAME];

const OPTIONAL_DEFAULTS: [(&str, &str); 5] = [
    (PAGERDUTY_TIME_ZONE, "Europe/Berlin"),
    (PAGERDUTY_IDENTITY_FIELD, "description"),
    (TRELLO_API_URL, "https://api.trello.com/1"),
    (PAGERDUTY_API_URL, "https://api.pagerduty.com"),
    (HTTP_TIMEOUT_SECS, "30"),
];

/// Parameter mapping for a single run.
///
/// Only keys present in [`ConfigValues::defaults`] can ever be set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValues {
    values: BTreeMap<String, String>,
}

impl Default for ConfigValues {
    fn default() -> Self {
        Self::defaults()
    }
}

impl ConfigValues {
    /// Mapping seeded with placeholders for credential and target keys, defaults for the rest.
    pub fn defaults() -> Self {
        let mut values: BTreeMap<String, String> = REQUIRED_KEYS
            .iter()
            .chain(OPTIONAL_PLACEHOLDER_KEYS.iter())
            .map(|key| (key.to_string(), PLACEHOLDER.to_string()))
            .collect();
        for (key, value) in OPTIONAL_DEFAULTS {
            values.insert(key.to_string(), value.to_string());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Apply every recognized `key=value` line of `content`; later lines win.
    pub fn apply_str(&mut self, content: &str) {
        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            if let Some(slot) = self.values.get_mut(key) {
                *slot = value.trim().to_string();
                debug!(key, "Replacing configuration value");
            }
        }
    }

    /// Apply a file; an empty path is skipped.
    pub fn apply_file(&mut self, path: &Path) -> Result<(), AppError> {
        if path.as_os_str().is_empty() {
            return Ok(());
        }
        let content = fs::read_to_string(path)
            .map_err(|source| AppError::ConfigFileRead { path: path.to_path_buf(), source })?;
        debug!(path = %path.display(), "Applying configuration file");
        self.apply_str(&content);
        Ok(())
    }

    /// Required keys that still hold the placeholder or are empty.
    pub fn unset_required_keys(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| matches!(self.get(key), None | Some("") | Some(PLACEHOLDER)))
            .collect()
    }
}

/// Load the run configuration from the given files, in order.
pub fn load_config_files<P: AsRef<Path>>(paths: &[P]) -> Result<ConfigValues, AppError> {
    let mut values = ConfigValues::defaults();
    for path in paths {
        values.apply_file(path.as_ref())?;
    }
    Ok(values)
}
