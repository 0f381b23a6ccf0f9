//! CSV Export functionality
//!
//! Exports the book list to a spreadsheet-compatible CSV file. Fields
//! containing commas, quotes, or line breaks are quoted with doubled
//! internal quotes.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{LibraryError, LibraryResult};
use crate::models::Book;

/// Header row of the export
pub const CSV_HEADER: [&str; 5] = ["Id", "Title", "Author", "Year", "Genre"];

/// Export books to CSV, returning the number of rows written
pub fn export_books_csv<W: Write>(books: &[Book], writer: W) -> LibraryResult<usize> {
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;

    for book in books {
        csv_writer.write_record([
            book.id.to_string().as_str(),
            book.title.as_str(),
            book.author.as_str(),
            book.year.to_string().as_str(),
            book.genre_or_empty(),
        ])?;
    }

    csv_writer
        .flush()
        .map_err(|e| LibraryError::Export(e.to_string()))?;

    Ok(books.len())
}

/// Export books to a CSV file, replacing any existing file
pub fn export_books_csv_file<P: AsRef<Path>>(books: &[Book], path: P) -> LibraryResult<usize> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| {
        LibraryError::Export(format!("Failed to create {}: {}", path.display(), e))
    })?;

    let count = export_books_csv(books, BufWriter::new(file))?;
    log::debug!("Exported {} book(s) to {}", count, path.display());
    Ok(count)
}
