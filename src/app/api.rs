//! API Facade for the application.
//!
//! Glues configuration loading, client construction and command execution.

use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::adapters::{PagerDutyClient, TrelloClient};
use crate::app::AppContext;
use crate::app::commands::sync::{self, SyncRequest};
use crate::domain::{OnCallWindow, SyncSettings, load_config_files};

pub use crate::app::commands::sync::SyncOutcome;
pub use crate::domain::AppError;

/// Load settings from the config file and the token file, in that order.
pub fn load_settings(config_file: &Path, token_file: &Path) -> Result<SyncSettings, AppError> {
    let values = load_config_files(&[config_file, token_file])?;
    let settings = SyncSettings::from_values(&values)?;
    debug!(?settings, "Loaded configuration");
    Ok(settings)
}

/// Run one sync against the live services, with the on-call window starting now.
pub fn sync_on_call(settings: &SyncSettings) -> Result<SyncOutcome, AppError> {
    sync_on_call_at(settings, Utc::now())
}

/// Run one sync with the on-call window starting at `now`.
pub fn sync_on_call_at(
    settings: &SyncSettings,
    now: DateTime<Utc>,
) -> Result<SyncOutcome, AppError> {
    let board = TrelloClient::new(&settings.trello, settings.timeout_secs)?;
    let alerting = PagerDutyClient::new(&settings.pagerduty, settings.timeout_secs)?;
    let ctx = AppContext::new(board, alerting);

    let request = SyncRequest {
        card_id: settings.trello.card_id.clone(),
        schedule_name: settings.pagerduty.schedule_name.clone(),
        window: OnCallWindow::starting_at(now, settings.pagerduty.time_zone),
    };

    sync::execute(&ctx, &request, &settings.pagerduty.identity_field)
}
