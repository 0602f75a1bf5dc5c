//! Docscrape core: pure state machine for the scrape control surface.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, RunResultKind, SessionState};
pub use update::update;
pub use view_model::{AppViewModel, ProgressView};
