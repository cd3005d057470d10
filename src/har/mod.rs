pub mod loader;
pub mod model;

// Re-export commonly used types
pub use loader::HarLoader;
pub use model::{Archive, Content, Cookie, Entry, Header, PostData, PostParam, QueryParam, Request, Response};
