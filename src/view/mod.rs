pub mod classify;
pub mod printer;
pub mod rows;

pub use classify::{Category, Classification, Emphasis, Filter, classify};
pub use printer::RowPrinter;
pub use rows::{Row, RowTable, project_rows};
