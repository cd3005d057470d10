pub mod model;
pub mod printer;
pub mod selector;
pub mod store;

pub use model::HistoryEntry;
pub use printer::render_history;
pub use selector::{SelectionStrategy, select_entry};
pub use store::{HistoryStore, SHORTCUT_SLOTS};
