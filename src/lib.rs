pub mod browse;
pub mod config;
pub mod error;
pub mod har;
pub mod history;
pub mod logger;
pub mod preview;
pub mod session;
pub mod utils;
pub mod view;

// Re-export commonly used types
pub use error::{HarviewError, Result};
