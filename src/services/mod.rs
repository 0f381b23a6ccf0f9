//! Service layer for Bookshelf
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation, id assignment, and change tracking.

pub mod library;

pub use library::{Library, SAMPLE_BOOKS};
