//! Mapping Trello members onto PagerDuty users.

use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;
use crate::ports::AlertingUser;

/// Strategy deciding whether a PagerDuty user is the given Trello member.
pub trait IdentityMatcher {
    /// Name of the compared attribute, used in error messages.
    fn field_name(&self) -> &'static str;

    fn matches(&self, board_username: &str, user: &AlertingUser) -> bool;
}

/// PagerDuty user attribute that carries the Trello username.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentityField {
    /// Free-text description equals the username exactly.
    #[default]
    Description,
    /// Display name equals the username exactly.
    Name,
    /// Local part of the e-mail address equals the username, ignoring case.
    Email,
}

impl IdentityField {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentityField::Description => "description",
            IdentityField::Name => "name",
            IdentityField::Email => "email",
        }
    }
}

impl fmt::Display for IdentityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdentityField {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "description" => Ok(IdentityField::Description),
            "name" => Ok(IdentityField::Name),
            "email" => Ok(IdentityField::Email),
            other => Err(AppError::config_error(format!(
                "Invalid identity field '{}': must be one of description, name, email",
                other
            ))),
        }
    }
}

impl IdentityMatcher for IdentityField {
    fn field_name(&self) -> &'static str {
        self.as_str()
    }

    fn matches(&self, board_username: &str, user: &AlertingUser) -> bool {
        match self {
            IdentityField::Description => user.description.as_deref() == Some(board_username),
            IdentityField::Name => user.name == board_username,
            IdentityField::Email => user
                .email
                .as_deref()
                .and_then(|email| email.split_once('@'))
                .is_some_and(|(local, _)| local.eq_ignore_ascii_case(board_username)),
        }
    }
}

/// First user accepted by `matcher`; later candidates are never inspected.
pub fn find_user<'a, M: IdentityMatcher + ?Sized>(
    matcher: &M,
    board_username: &str,
    users: &'a [AlertingUser],
) -> Option<&'a AlertingUser> {
    users.iter().find(|user| matcher.matches(board_username, user))
}
