//! Book model
//!
//! A single catalog record plus the input shapes used to create and edit one.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::ids::BookId;

/// A book record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Book {
    /// Unique identifier
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Publication year
    pub year: i32,

    /// Optional genre
    #[serde(default)]
    pub genre: Option<String>,
}

impl Book {
    /// Create a new book with the given id
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: Option<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year,
            genre: normalize_genre(genre),
        }
    }

    /// Validate the book
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.title.trim().is_empty() {
            return Err(BookValidationError::EmptyTitle);
        }

        if self.author.trim().is_empty() {
            return Err(BookValidationError::EmptyAuthor);
        }

        let max = current_year();
        if !(0..=max).contains(&self.year) {
            return Err(BookValidationError::YearOutOfRange { year: self.year, max });
        }

        Ok(())
    }

    /// Genre as text, empty when absent
    pub fn genre_or_empty(&self) -> &str {
        self.genre.as_deref().unwrap_or("")
    }

    /// Whether title, author, or genre contains `term`, ignoring case
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.author.to_lowercase().contains(&term)
            || self
                .genre
                .as_ref()
                .is_some_and(|g| g.to_lowercase().contains(&term))
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {} ({})", self.title, self.author, self.year)
    }
}

/// The current calendar year, the upper bound for publication years
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Trim a genre and map blank values to `None`
pub fn normalize_genre(genre: Option<String>) -> Option<String> {
    genre
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
}

/// Validation errors for books
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    YearOutOfRange { year: i32, max: i32 },
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Title cannot be empty"),
            Self::EmptyAuthor => write!(f, "Author cannot be empty"),
            Self::YearOutOfRange { year, max } => {
                write!(f, "Year {} is out of range (0-{})", year, max)
            }
        }
    }
}

impl std::error::Error for BookValidationError {}

/// Input for adding a book; the store assigns the id
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: Option<String>,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: Option<&str>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.map(str::to_string),
        }
    }
}

/// Field updates for an existing book
///
/// `None` keeps the current value. Blank `title`/`author` also keep the
/// current value, while a blank `genre` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookEdit {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
}

impl BookEdit {
    /// Apply the edit to a copy of `book`
    pub fn apply_to(&self, book: &Book) -> Book {
        let mut updated = book.clone();

        if let Some(title) = self.title.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
            updated.title = title.to_string();
        }
        if let Some(author) = self.author.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            updated.author = author.to_string();
        }
        if let Some(year) = self.year {
            updated.year = year;
        }
        if let Some(genre) = &self.genre {
            updated.genre = normalize_genre(Some(genre.clone()));
        }

        updated
    }
}

/// Field used to order the library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Year,
    Genre,
}

impl SortKey {
    /// Compare two books by this key in ascending order
    pub fn compare(&self, a: &Book, b: &Book) -> Ordering {
        match self {
            Self::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            Self::Author => a.author.to_lowercase().cmp(&b.author.to_lowercase()),
            Self::Year => a.year.cmp(&b.year),
            Self::Genre => a
                .genre_or_empty()
                .to_lowercase()
                .cmp(&b.genre_or_empty().to_lowercase()),
        }
    }
    /// Compare by this key, reversed when `descending`
    ///
    /// Only the key comparison is reversed, so a stable sort keeps ties in
    /// their prior order either way.
    pub fn ordering(&self, a: &Book, b: &Book, descending: bool) -> Ordering {
        let ordering = self.compare(a, b);
        if descending {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Author => write!(f, "author"),
            Self::Year => write!(f, "year"),
            Self::Genre => write!(f, "genre"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "t" | "title" => Ok(Self::Title),
            "a" | "author" => Ok(Self::Author),
            "y" | "year" => Ok(Self::Year),
            "g" | "genre" => Ok(Self::Genre),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> Book {
        Book::new(BookId::new(1), "Dune", "Frank Herbert", 1965, Some("Sci-Fi".into()))
    }

    #[test]
    fn test_validate() {
        assert!(dune().validate().is_ok());

        let mut book = dune();
        book.title = "   ".into();
        assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));

        let mut book = dune();
        book.author = String::new();
        assert_eq!(book.validate(), Err(BookValidationError::EmptyAuthor));

        let mut book = dune();
        book.year = current_year() + 1;
        assert!(matches!(
            book.validate(),
            Err(BookValidationError::YearOutOfRange { .. })
        ));

        book.year = -1;
        assert!(book.validate().is_err());

        book.year = 0;
        assert!(book.validate().is_ok());
    }

    #[test]
    fn test_blank_genre_is_absent() {
        let book = Book::new(BookId::new(1), "T", "A", 2000, Some("  ".into()));
        assert_eq!(book.genre, None);
        assert_eq!(book.genre_or_empty(), "");
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let book = dune();
        assert!(book.matches("dune"));
        assert!(book.matches("HERBERT"));
        assert!(book.matches("sci"));
        assert!(!book.matches("orwell"));

        let no_genre = Book::new(BookId::new(2), "1984", "George Orwell", 1949, None);
        assert!(!no_genre.matches("sci"));
    }

    #[test]
    fn test_edit_keeps_blank_fields() {
        let edit = BookEdit {
            title: Some("".into()),
            author: None,
            year: Some(1966),
            genre: None,
        };
        let updated = edit.apply_to(&dune());
        assert_eq!(updated.title, "Dune");
        assert_eq!(updated.author, "Frank Herbert");
        assert_eq!(updated.year, 1966);
        assert_eq!(updated.genre.as_deref(), Some("Sci-Fi"));
    }

    #[test]
    fn test_edit_blank_genre_clears() {
        let edit = BookEdit {
            genre: Some(" ".into()),
            ..Default::default()
        };
        assert_eq!(edit.apply_to(&dune()).genre, None);
    }

    #[test]
    fn test_sort_key_parse() {
        assert_eq!("T".parse::<SortKey>().unwrap(), SortKey::Title);
        assert_eq!("author".parse::<SortKey>().unwrap(), SortKey::Author);
        assert_eq!("y".parse::<SortKey>().unwrap(), SortKey::Year);
        assert_eq!("Genre".parse::<SortKey>().unwrap(), SortKey::Genre);
        assert!("x".parse::<SortKey>().is_err());
    }

    #[test]
    fn test_sort_key_genre_missing_sorts_first() {
        let none = Book::new(BookId::new(2), "B", "B", 2000, None);
        assert_eq!(SortKey::Genre.compare(&none, &dune()), Ordering::Less);
    }

    #[test]
    fn test_sort_key_ordering_descending() {
        let old = Book::new(BookId::new(2), "Emma", "Jane Austen", 1815, None);
        assert_eq!(SortKey::Year.ordering(&old, &dune(), false), Ordering::Less);
        assert_eq!(SortKey::Year.ordering(&old, &dune(), true), Ordering::Greater);
        assert_eq!(SortKey::Title.ordering(&dune(), &dune(), true), Ordering::Equal);
    }

    #[test]
    fn test_serde_uses_pascal_case() {
        let json = serde_json::to_value(dune()).unwrap();
        assert_eq!(json["Id"], 1);
        assert_eq!(json["Title"], "Dune");
        assert_eq!(json["Genre"], "Sci-Fi");

        let no_genre = Book::new(BookId::new(2), "1984", "George Orwell", 1949, None);
        let json = serde_json::to_value(no_genre).unwrap();
        assert!(json["Genre"].is_null());
    }
}
