//! Book repository for JSON storage
//!
//! Manages loading and saving the book list to books.json. Loading accepts
//! hand-edited files: field names match case-insensitively and trailing
//! commas are ignored.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::error::LibraryError;
use crate::models::Book;

use super::file_io::{read_json_lenient, write_json_atomic};

/// Canonical field names as written to disk
const BOOK_FIELDS: [&str; 5] = ["Id", "Title", "Author", "Year", "Genre"];

/// Repository for book persistence
#[derive(Debug, Clone)]
pub struct BookRepository {
    path: PathBuf,
}

impl BookRepository {
    /// Create a new book repository
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load books from disk
    ///
    /// A missing file yields an empty list.
    pub fn load(&self) -> Result<Vec<Book>, LibraryError> {
        let value = match read_json_lenient(&self.path)? {
            Some(Value::Null) | None => return Ok(Vec::new()),
            Some(value) => value,
        };

        let books: Vec<Book> = serde_json::from_value(normalize_field_names(value))?;

        log::debug!("Loaded {} book(s) from {}", books.len(), self.path.display());
        Ok(books)
    }

    /// Save books to disk, replacing the previous contents
    pub fn save(&self, books: &[Book]) -> Result<(), LibraryError> {
        write_json_atomic(&self.path, books)?;
        log::debug!("Saved {} book(s) to {}", books.len(), self.path.display());
        Ok(())
    }
}

/// Rewrite object keys in a book array to their canonical casing
fn normalize_field_names(value: Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(items.into_iter().map(normalize_object).collect()),
        other => other,
    }
}

fn normalize_object(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let normalized: Map<String, Value> = map
                .into_iter()
                .map(|(key, v)| {
                    let canonical = BOOK_FIELDS
                        .iter()
                        .find(|field| field.eq_ignore_ascii_case(&key))
                        .map(|field| field.to_string())
                        .unwrap_or(key);
                    (canonical, v)
                })
                .collect();
            Value::Object(normalized)
        }
        other => other,
    }
}
