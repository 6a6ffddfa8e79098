use std::sync::Mutex;

use crate::domain::{AppError, OnCallWindow};
use crate::ports::{
    AlertingService, AlertingUser, CreatedOverride, OnCallEntry, OverrideRequest, Schedule,
};

pub fn alerting_user(id: &str, description: &str) -> AlertingUser {
    AlertingUser {
        id: id.to_string(),
        name: description.to_string(),
        email: Some(format!("{}@example.com", description)),
        description: Some(description.to_string()),
    }
}

/// In-memory alerting service recording every call it receives.
#[derive(Default)]
pub struct FakeAlerting {
    pub schedules: Vec<Schedule>,
    pub on_calls: Vec<OnCallEntry>,
    pub users: Mutex<Vec<AlertingUser>>,
    pub calls: Mutex<Vec<String>>,
    pub overrides: Mutex<Vec<(String, OverrideRequest)>>,
}

impl FakeAlerting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_schedule(mut self, id: &str, name: &str) -> Self {
        self.schedules.push(Schedule { id: id.to_string(), name: name.to_string() });
        self
    }

    pub fn with_on_calls(mut self, user_ids: &[&str]) -> Self {
        self.on_calls = user_ids
            .iter()
            .map(|id| OnCallEntry { user_id: id.to_string(), user_summary: None })
            .collect();
        self
    }

    pub fn set_users(&self, users: Vec<AlertingUser>) {
        *self.users.lock().unwrap() = users;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn created_overrides(&self) -> Vec<(String, OverrideRequest)> {
        self.overrides.lock().unwrap().clone()
    }

    fn record(&self, call: &str) {
        self.calls.lock().unwrap().push(call.to_string());
    }
}

impl AlertingService for FakeAlerting {
    fn list_schedules(&self) -> Result<Vec<Schedule>, AppError> {
        self.record("list_schedules");
        Ok(self.schedules.clone())
    }

    fn list_on_calls(
        &self,
        schedule_id: &str,
        _window: &OnCallWindow,
    ) -> Result<Vec<OnCallEntry>, AppError> {
        self.record("list_on_calls");
        if self.schedules.iter().any(|s| s.id == schedule_id) {
            Ok(self.on_calls.clone())
        } else {
            Ok(Vec::new())
        }
    }

    fn list_users(&self) -> Result<Vec<AlertingUser>, AppError> {
        self.record("list_users");
        Ok(self.users.lock().unwrap().clone())
    }

    fn create_override(
        &self,
        schedule_id: &str,
        request: &OverrideRequest,
    ) -> Result<CreatedOverride, AppError> {
        self.record("create_override");
        let mut overrides = self.overrides.lock().unwrap();
        overrides.push((schedule_id.to_string(), request.clone()));
        Ok(CreatedOverride {
            id: format!("O{}", overrides.len()),
            start: request.window.start_rfc3339(),
            end: request.window.end_rfc3339(),
            user_id: request.user_id.clone(),
        })
    }
}
