//! oncall-sync: mirror the Trello on-call card member into a PagerDuty schedule override.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;


pub use app::api::{SyncOutcome, load_settings, sync_on_call, sync_on_call_at};
pub use domain::{AppError, IdentityField, IdentityMatcher, OnCallResolution, OnCallWindow};
