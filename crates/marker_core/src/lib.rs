//! Marker core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{BatchSpec, Effect};
pub use msg::Msg;
pub use state::{AppState, Notice, SessionSnapshot, SessionState};
pub use update::{parse_keywords, update};
pub use view_model::AppViewModel;
