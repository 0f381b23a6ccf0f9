//! Core data models for Bookshelf
//!
//! This module contains the data structures that represent the catalog
//! domain: books, their ids, and the inputs used to change them.

pub mod book;
pub mod ids;

pub use book::{current_year, Book, BookEdit, BookValidationError, NewBook, SortKey};
pub use ids::BookId;
