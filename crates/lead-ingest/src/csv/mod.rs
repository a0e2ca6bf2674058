//! CSV file reading.

mod reader;

pub use reader::{parse_csv_text, read_csv_bytes};
