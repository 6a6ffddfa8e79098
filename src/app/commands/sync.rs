//! Sync the Trello on-call member into a PagerDuty schedule override.

use tracing::{debug, info};

use crate::app::AppContext;
use crate::domain::{AppError, IdentityMatcher, OnCallResolution, OnCallWindow, find_user};
use crate::ports::{AlertingService, OverrideRequest, TaskBoard};

/// Inputs for a single sync run.
#[derive(Debug, Clone)]
pub struct SyncRequest {
    /// Trello card whose first member is on call.
    pub card_id: String,
    /// Exact name of the PagerDuty schedule to manage.
    pub schedule_name: String,
    /// Window queried for the current on-call user and covered by the override.
    pub window: OnCallWindow,
}

/// Result of a completed sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The Trello member is already the scheduled on-call user.
    AlreadyOnCall { resolution: OnCallResolution },
    /// An override was created for the Trello member.
    OverrideCreated { resolution: OnCallResolution, override_id: String },
}

impl SyncOutcome {
    pub fn resolution(&self) -> &OnCallResolution {
        match self {
            SyncOutcome::AlreadyOnCall { resolution }
            | SyncOutcome::OverrideCreated { resolution, .. } => resolution,
        }
    }
}

/// Execute the sync: card member, scheduled user, identity mapping, then override if needed.
pub fn execute<B, A, M>(
    ctx: &AppContext<B, A>,
    request: &SyncRequest,
    matcher: &M,
) -> Result<SyncOutcome, AppError>
where
    B: TaskBoard,
    A: AlertingService,
    M: IdentityMatcher + ?Sized,
{
    let mut resolution = OnCallResolution {
        board_username: resolve_board_username(ctx.board(), &request.card_id)?,
        ..OnCallResolution::default()
    };

    let (schedule_id, scheduled_user_id) =
        resolve_scheduled_user(ctx.alerting(), &request.schedule_name, &request.window)?;
    resolution.schedule_id = schedule_id;
    resolution.scheduled_user_id = scheduled_user_id;

    resolution.board_user_id =
        resolve_alerting_user(ctx.alerting(), matcher, &resolution.board_username)?;

    if !resolution.needs_override() {
        info!(
            user_id = %resolution.board_user_id,
            schedule_id = %resolution.schedule_id,
            "Trello on-call user is already on call, no override needed"
        );
        return Ok(SyncOutcome::AlreadyOnCall { resolution });
    }

    let override_request =
        OverrideRequest { window: request.window, user_id: resolution.board_user_id.clone() };
    let created = ctx.alerting().create_override(&resolution.schedule_id, &override_request)?;
    info!(
        override_id = %created.id,
        user_id = %created.user_id,
        start = %created.start,
        end = %created.end,
        replaced_user_id = %resolution.scheduled_user_id,
        "Created on-call override"
    );

    Ok(SyncOutcome::OverrideCreated { resolution, override_id: created.id })
}

/// Username of the first member assigned to the card.
fn resolve_board_username<B: TaskBoard>(board: &B, card_id: &str) -> Result<String, AppError> {
    let card = board.get_card(card_id)?;
    debug!(card_id = %card.id, card_name = %card.name, "Fetched Trello card");

    let members = board.get_card_members(&card)?;
    let first = members
        .into_iter()
        .next()
        .ok_or_else(|| AppError::CardHasNoMembers { card_id: card_id.to_string() })?;

    info!(
        username = %first.username,
        member_id = %first.id,
        full_name = first.full_name.as_deref().unwrap_or(""),
        "Resolved Trello on-call member"
    );
    Ok(first.username)
}

/// Identifier of the named schedule and of the first user on call in `window`.
fn resolve_scheduled_user<A: AlertingService>(
    alerting: &A,
    schedule_name: &str,
    window: &OnCallWindow,
) -> Result<(String, String), AppError> {
    let schedules = alerting.list_schedules()?;
    debug!(count = schedules.len(), "Fetched PagerDuty schedules");

    // Names are not unique; the first listed schedule with the name is managed.
    let schedule = schedules
        .into_iter()
        .find(|schedule| schedule.name == schedule_name)
        .ok_or_else(|| AppError::ScheduleNotFound { name: schedule_name.to_string() })?;

    let on_calls = alerting.list_on_calls(&schedule.id, window)?;
    let current = on_calls
        .into_iter()
        .next()
        .ok_or_else(|| AppError::NoOnCallUser { schedule_id: schedule.id.clone() })?;

    info!(
        schedule_id = %schedule.id,
        user_id = %current.user_id,
        user = current.user_summary.as_deref().unwrap_or(""),
        "Resolved current PagerDuty on-call user"
    );
    Ok((schedule.id, current.user_id))
}

/// Identifier of the alerting user that `matcher` maps the board username onto.
fn resolve_alerting_user<A, M>(
    alerting: &A,
    matcher: &M,
    board_username: &str,
) -> Result<String, AppError>
where
    A: AlertingService,
    M: IdentityMatcher + ?Sized,
{
    let users = alerting.list_users()?;
    debug!(count = users.len(), "Fetched PagerDuty users");

    let user = find_user(matcher, board_username, &users).ok_or_else(|| {
        AppError::NoMatchingUser {
            username: board_username.to_string(),
            field: matcher.field_name(),
        }
    })?;

    debug!(user_id = %user.id, name = %user.name, "Mapped Trello member to PagerDuty user");
    Ok(user.id.clone())
}
