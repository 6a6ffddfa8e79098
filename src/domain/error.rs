use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for oncall-sync operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// A configuration or token file could not be read.
    #[error("Cannot read configuration file '{}': {source}", .path.display())]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration value missing, still a placeholder, or malformed.
    #[error("{0}")]
    Configuration(String),

    /// Transport failure or non-success response from a remote service.
    #[error("{service} request failed: {details}")]
    Http { service: &'static str, details: String },

    /// Response body from a remote service could not be decoded.
    #[error("Failed to decode {service} response: {details}")]
    Decode { service: &'static str, details: String },

    /// The configured card has no members assigned.
    #[error("No members assigned to Trello card '{card_id}', bailing out")]
    CardHasNoMembers { card_id: String },

    /// No PagerDuty schedule carries the configured name.
    #[error("No schedule found with name '{name}'")]
    ScheduleNotFound { name: String },

    /// The schedule has nobody on call in the queried window.
    #[error("No on-call user in schedule '{schedule_id}'")]
    NoOnCallUser { schedule_id: String },

    /// No PagerDuty user maps to the Trello member.
    #[error("Cannot find PagerDuty user whose {field} matches Trello user '{username}'")]
    NoMatchingUser { username: String, field: &'static str },
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }
}
