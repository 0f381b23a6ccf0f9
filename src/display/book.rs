//! Book display formatting
//!
//! Formats book lists for terminal output.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::Book;

/// Message shown in place of an empty table
pub const EMPTY_LIST_MESSAGE: &str = "(No books yet...)";

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Author")]
    author: String,
    #[tabled(rename = "Year")]
    year: String,
    #[tabled(rename = "Genre")]
    genre: String,
}

impl From<&Book> for BookRow {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.to_string(),
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year.to_string(),
            genre: book.genre_or_empty().to_string(),
        }
    }
}

/// Format a list of books as a table
pub fn format_book_table<'a, I>(books: I) -> String
where
    I: IntoIterator<Item = &'a Book>,
{
    let rows: Vec<BookRow> = books.into_iter().map(BookRow::from).collect();
    if rows.is_empty() {
        return EMPTY_LIST_MESSAGE.to_string();
    }

    let mut table = Table::new(rows);
    table.with(Style::ascii());
    table.to_string()
}

/// One-line summary of a book, used in confirmations
pub fn format_book_summary(book: &Book) -> String {
    match &book.genre {
        Some(genre) => format!("#{} {} [{}]", book.id, book, genre),
        None => format!("#{} {}", book.id, book),
    }
}
