pub mod configuration;
pub mod error;
pub mod identity;
pub mod oncall;

pub use configuration::{
    ConfigValues, PagerDutySettings, SyncSettings, TrelloSettings, load_config_files,
};
pub use error::AppError;
pub use identity::{IdentityField, IdentityMatcher, find_user};
pub use oncall::{ON_CALL_HOURS, OnCallResolution, OnCallWindow};
