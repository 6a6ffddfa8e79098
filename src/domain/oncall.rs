//! On-call window and the per-run resolution record.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use chrono_tz::Tz;

/// Length of both the queried on-call window and the created override.
pub const ON_CALL_HOURS: i64 = 24;

/// Time range `[now, now + 24h]` expressed in the schedule's time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnCallWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl OnCallWindow {
    pub fn starting_at(now: DateTime<Utc>, time_zone: Tz) -> Self {
        let start = now.with_timezone(&time_zone);
        Self { start, end: start + Duration::hours(ON_CALL_HOURS) }
    }

    pub fn start_rfc3339(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Secs, false)
    }

    pub fn end_rfc3339(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Secs, false)
    }
}

/// Identities gathered by the sync steps, filled in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OnCallResolution {
    /// Username of the first member on the Trello card.
    pub board_username: String,
    /// PagerDuty user currently on call for the schedule.
    pub scheduled_user_id: String,
    /// PagerDuty schedule being managed.
    pub schedule_id: String,
    /// PagerDuty user corresponding to `board_username`.
    pub board_user_id: String,
}

impl OnCallResolution {
    pub fn needs_override(&self) -> bool {
        self.scheduled_user_id != self.board_user_id
    }
}
