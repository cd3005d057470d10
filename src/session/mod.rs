pub mod dropped;
pub mod event;
pub mod state;

pub use dropped::{accept_dropped, is_har_path};
pub use event::{DetailTab, LoadOutcome, LoadRequest, SessionEvent};
pub use state::Session;
