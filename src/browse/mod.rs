pub mod command;
pub mod runner;

pub use command::BrowseCommand;
pub use runner::BrowseRunner;
