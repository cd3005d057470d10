pub mod formatter;

pub use formatter::{DetailFormatter, NO_RESPONSE_DATA};
