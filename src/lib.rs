//! Bookshelf - Terminal-based personal library catalog
//!
//! This library provides the core functionality for the Bookshelf
//! application: an ordered collection of book records persisted to a JSON
//! file, with search, sort, CSV export, and an interactive text console.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (books, ids, edit inputs)
//! - `storage`: JSON file storage layer
//! - `services`: The in-memory library store
//! - `export`: CSV export
//! - `display`: Table formatting
//! - `console`: Interactive menu
//!
//! # Example
//!
//! ```rust,ignore
//! use bookshelf::config::{LibraryPaths, Settings};
//! use bookshelf::services::Library;
//! use bookshelf::storage::BookRepository;
//!
//! let paths = LibraryPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let library = Library::open(BookRepository::new(paths.books_file(&settings)));
//! ```

pub mod config;
pub mod console;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::LibraryError;
