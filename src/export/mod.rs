//! Export module for Bookshelf
//!
//! CSV is the only export format; it is write-only and never read back.

pub mod csv;

pub use self::csv::{export_books_csv, export_books_csv_file, CSV_HEADER};
