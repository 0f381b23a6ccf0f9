//! Storage layer for Bookshelf
//!
//! Provides JSON file storage with atomic writes and lenient reads.

pub mod books;
pub mod file_io;

pub use books::BookRepository;
pub use file_io::{read_json_lenient, write_json_atomic};
