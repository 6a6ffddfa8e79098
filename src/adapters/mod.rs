mod pagerduty;
mod trello;

pub use pagerduty::PagerDutyClient;
pub use trello::TrelloClient;
