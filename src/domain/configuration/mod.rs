pub mod loader;
pub mod settings;

pub use loader::{ConfigValues, PLACEHOLDER, load_config_files};
pub use settings::{PagerDutySettings, SyncSettings, TrelloSettings};
