mod alerting;
mod task_board;

pub use alerting::{
    AlertingService, AlertingUser, CreatedOverride, OnCallEntry, OverrideRequest, Schedule,
};
pub use task_board::{BoardMember, Card, TaskBoard};
