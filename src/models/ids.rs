//! Strongly-typed book identifier
//!
//! Book ids are small positive integers assigned by the library store, so the
//! wrapper is a plain `u32` rather than a UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// Identifier of a book, unique within one library
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(u32);

impl BookId {
    /// The first id handed out by an empty library
    pub const FIRST: BookId = BookId(1);

    /// Wrap a raw id value
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// Get the raw id value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// The id following this one, or `None` past `u32::MAX`
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BookId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl FromStr for BookId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.trim().parse()?))
    }
}
