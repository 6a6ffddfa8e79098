//! Typed sync settings built from the loaded key/value mapping.

use chrono_tz::Tz;
use url::Url;

use crate::domain::configuration::loader::{self, ConfigValues};
use crate::domain::{AppError, IdentityField};

/// Trello API configuration.
#[derive(Clone)]
pub struct TrelloSettings {
    pub api_url: Url,
    pub app_key: String,
    pub token: String,
    /// Recognized for compatibility with existing config files; no call uses it.
    pub user_name: Option<String>,
    pub card_id: String,
}

/// PagerDuty API configuration.
#[derive(Clone)]
pub struct PagerDutySettings {
    pub api_url: Url,
    pub token: String,
    pub schedule_name: String,
    pub time_zone: Tz,
    pub identity_field: IdentityField,
}

/// Everything a sync run needs, validated before any request is sent.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub trello: TrelloSettings,
    pub pagerduty: PagerDutySettings,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for TrelloSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrelloSettings")
            .field("api_url", &self.api_url)
            .field("app_key", &"[REDACTED]")
            .field("token", &"[REDACTED]")
            .field("user_name", &self.user_name)
            .field("card_id", &self.card_id)
            .finish()
    }
}

impl std::fmt::Debug for PagerDutySettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagerDutySettings")
            .field("api_url", &self.api_url)
            .field("token", &"[REDACTED]")
            .field("schedule_name", &self.schedule_name)
            .field("time_zone", &self.time_zone)
            .field("identity_field", &self.identity_field)
            .finish()
    }
}

impl SyncSettings {
    pub fn from_values(values: &ConfigValues) -> Result<Self, AppError> {
        let unset = values.unset_required_keys();
        if !unset.is_empty() {
            return Err(AppError::config_error(format!(
                "Configuration keys not set: {}",
                unset.join(", ")
            )));
        }

        let trello = TrelloSettings {
            api_url: parse_url(values, loader::TRELLO_API_URL)?,
            app_key: required(values, loader::TRELLO_APP_KEY)?,
            token: required(values, loader::TRELLO_TOKEN)?,
            user_name: values
                .get(loader::TRELLO_USER_NAME)
                .filter(|name| !name.is_empty() && *name != loader::PLACEHOLDER)
                .map(str::to_string),
            card_id: required(values, loader::TRELLO_CARD_ID)?,
        };

        let time_zone_name = required(values, loader::PAGERDUTY_TIME_ZONE)?;
        let time_zone = time_zone_name.parse::<Tz>().map_err(|_| {
            AppError::config_error(format!("Invalid time zone '{}'", time_zone_name))
        })?;

        let pagerduty = PagerDutySettings {
            api_url: parse_url(values, loader::PAGERDUTY_API_URL)?,
            token: required(values, loader::PAGERDUTY_TOKEN)?,
            schedule_name: required(values, loader::PAGERDUTY_SCHEDULE_NAME)?,
            time_zone,
            identity_field: required(values, loader::PAGERDUTY_IDENTITY_FIELD)?.parse()?,
        };

        let timeout_raw = required(values, loader::HTTP_TIMEOUT_SECS)?;
        let timeout_secs = match timeout_raw.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                return Err(AppError::config_error(format!(
                    "{} must be a positive number of seconds, got '{}'",
                    loader::HTTP_TIMEOUT_SECS,
                    timeout_raw
                )));
            }
        };

        Ok(Self { trello, pagerduty, timeout_secs })
    }
}

fn required(values: &ConfigValues, key: &str) -> Result<String, AppError> {
    values
        .get(key)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .ok_or_else(|| AppError::config_error(format!("Configuration key '{}' is empty", key)))
}

fn parse_url(values: &ConfigValues, key: &str) -> Result<Url, AppError> {
    let raw = required(values, key)?;
    Url::parse(&raw)
        .map_err(|e| AppError::config_error(format!("Invalid URL for {}: '{}' ({})", key, raw, e)))
}
