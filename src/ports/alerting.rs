//! Alerting service (PagerDuty) port definition.

use crate::domain::{AppError, OnCallWindow};

/// An on-call schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    pub id: String,
    pub name: String,
}

/// A user who is on call for a schedule during the queried window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OnCallEntry {
    pub user_id: String,
    pub user_summary: Option<String>,
}

/// An alerting service user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertingUser {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub description: Option<String>,
}

/// Override to create on a schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverrideRequest {
    pub window: OnCallWindow,
    /// Identifier of the user taking over, sent as a `user_reference`.
    pub user_id: String,
}

/// Override as stored by the alerting service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedOverride {
    pub id: String,
    pub start: String,
    pub end: String,
    pub user_id: String,
}

/// Port for alerting service operations.
pub trait AlertingService {
    fn list_schedules(&self) -> Result<Vec<Schedule>, AppError>;

    /// Users on call for `schedule_id` within `window`, in service order.
    fn list_on_calls(
        &self,
        schedule_id: &str,
        window: &OnCallWindow,
    ) -> Result<Vec<OnCallEntry>, AppError>;

    fn list_users(&self) -> Result<Vec<AlertingUser>, AppError>;

    fn create_override(
        &self,
        schedule_id: &str,
        request: &OverrideRequest,
    ) -> Result<CreatedOverride, AppError>;
}
