//! Display formatting for terminal output

pub mod book;

pub use book::{format_book_summary, format_book_table, EMPTY_LIST_MESSAGE};
