//! Library service
//!
//! The in-memory book store for one session. All mutation goes through the
//! methods here, which keep ids unique and track whether the collection has
//! unsaved changes.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{LibraryError, LibraryResult};
use crate::export::export_books_csv_file;
use crate::models::{Book, BookEdit, BookId, NewBook, SortKey};
use crate::storage::BookRepository;

/// Sample records added by [`Library::seed_samples`]
pub const SAMPLE_BOOKS: [(&str, &str, i32, &str); 3] = [
    ("Gödel, Escher, Bach", "Douglas Hofstadter", 1979, "Philosophy"),
    ("Simulacra and Simulation", "Jean Baudrillard", 1981, "Philosophy"),
    (
        "Zen and the Art of Motorcycle Maintenance",
        "Robert M. Pirsig",
        1974,
        "Biography",
    ),
];

/// Ordered collection of books backed by a data file
#[derive(Debug)]
pub struct Library {
    repository: BookRepository,
    books: Vec<Book>,
    /// Id handed to the next appended book, `None` once `u32::MAX` is taken
    next_id: Option<BookId>,
    /// Whether there are mutations not yet saved
    dirty: bool,
    load_warning: Option<String>,
}

impl Library {
    /// Open the library, falling back to an empty collection
    ///
    /// A missing file is not an error. An unreadable or corrupt file is
    /// logged and kept as a warning for the caller to show. Repeated or zero
    /// ids are renumbered, which leaves the library dirty.
    pub fn open(repository: BookRepository) -> Self {
        let (books, load_warning) = match repository.load() {
            Ok(books) => (books, None),
            Err(e) => {
                log::warn!(
                    "Failed to read {}, starting empty: {}",
                    repository.path().display(),
                    e
                );
                let warning = format!(
                    "Failed to read {}. Starting empty. Details: {}",
                    repository.path().display(),
                    e
                );
                (Vec::new(), Some(warning))
            }
        };

        let mut library = Self {
            next_id: next_id_after(&books),
            repository,
            books,
            dirty: false,
            load_warning,
        };
        library.repair_ids();
        library
    }

    /// Warning produced while opening, if the data file could not be read
    pub fn load_warning(&self) -> Option<&str> {
        self.load_warning.as_deref()
    }

    /// The backing repository
    pub fn repository(&self) -> &BookRepository {
        &self.repository
    }

    /// All books in canonical order
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Whether the collection has unsaved changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Get a book by id
    pub fn get(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    /// Add a new book at the end of the collection
    pub fn add(&mut self, input: NewBook) -> LibraryResult<Book> {
        let book = Book::new(
            self.allocate_id()?,
            input.title.trim(),
            input.author.trim(),
            input.year,
            input.genre,
        );

        book.validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;

        self.push(book.clone());
        log::debug!("Added book {}", book.id);
        Ok(book)
    }

    /// Update fields of an existing book
    pub fn edit(&mut self, id: BookId, edit: &BookEdit) -> LibraryResult<Book> {
        let index = self.index_of(id)?;
        let updated = edit.apply_to(&self.books[index]);

        updated
            .validate()
            .map_err(|e| LibraryError::Validation(e.to_string()))?;

        self.books[index] = updated.clone();
        self.dirty = true;
        log::debug!("Edited book {}", id);
        Ok(updated)
    }

    /// Remove a book
    pub fn delete(&mut self, id: BookId) -> LibraryResult<Book> {
        let index = self.index_of(id)?;
        let removed = self.books.remove(index);
        self.dirty = true;
        log::debug!("Deleted book {}", id);
        Ok(removed)
    }

    /// Books whose title, author, or genre contains `term`, ignoring case
    ///
    /// A blank term matches nothing.
    pub fn search(&self, term: &str) -> Vec<&Book> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        self.books.iter().filter(|b| b.matches(term)).collect()
    }

    /// Reorder the whole collection; equal keys keep their relative order
    pub fn sort(&mut self, key: SortKey, descending: bool) {
        self.books.sort_by(|a, b| key.ordering(a, b, descending));
        self.dirty = true;
        log::debug!("Sorted by {} (descending: {})", key, descending);
    }

    /// Remove every book, returning how many were removed
    pub fn clear(&mut self) -> usize {
        let removed = self.books.len();
        self.books.clear();
        self.next_id = Some(BookId::FIRST);
        self.dirty = true;
        log::debug!("Cleared {} book(s)", removed);
        removed
    }

    /// Append the sample books, then renumber all ids densely
    ///
    /// Nothing is added unless every sample can get an id.
    pub fn seed_samples(&mut self) -> LibraryResult<usize> {
        let mut ids = Vec::with_capacity(SAMPLE_BOOKS.len());
        let mut next = self.next_id;
        for _ in SAMPLE_BOOKS {
            let id = next.ok_or_else(no_ids_left)?;
            ids.push(id);
            next = id.next();
        }

        for (id, (title, author, year, genre)) in ids.into_iter().zip(SAMPLE_BOOKS) {
            self.push(Book::new(id, title, author, year, Some(genre.to_string())));
        }

        self.reassign_ids();
        Ok(SAMPLE_BOOKS.len())
    }

    /// Renumber ids 1..N following ascending current id
    ///
    /// The order of the collection itself is unchanged.
    pub fn reassign_ids(&mut self) {
        let mut by_id: Vec<usize> = (0..self.books.len()).collect();
        by_id.sort_by_key(|&i| self.books[i].id);

        let mut next = Some(BookId::FIRST);
        for index in by_id {
            // Unreachable past u32::MAX books
            if let Some(id) = next {
                self.books[index].id = id;
                next = id.next();
            }
        }

        self.next_id = next;
        self.dirty = true;
    }

    /// Write the collection to the data file
    ///
    /// On failure the collection and dirty flag are left as they were.
    pub fn save(&mut self) -> LibraryResult<usize> {
        self.repository.save(&self.books)?;
        self.dirty = false;
        Ok(self.books.len())
    }

    /// Replace the in-memory collection with the data file's contents
    ///
    /// On failure the current collection is kept.
    pub fn reload(&mut self) -> LibraryResult<usize> {
        let books = self.repository.load()?;
        self.next_id = next_id_after(&books);
        self.books = books;
        self.dirty = false;
        self.load_warning = None;
        self.repair_ids();
        Ok(self.books.len())
    }

    /// Write the collection to a CSV file
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> LibraryResult<usize> {
        export_books_csv_file(&self.books, path)
    }

    fn allocate_id(&self) -> LibraryResult<BookId> {
        self.next_id.ok_or_else(no_ids_left)
    }

    fn push(&mut self, book: Book) {
        self.next_id = book.id.next();
        self.books.push(book);
        self.dirty = true;
    }

    /// Renumber a freshly loaded collection whose ids are repeated or zero
    fn repair_ids(&mut self) {
        let mut seen = HashSet::new();
        if self
            .books
            .iter()
            .all(|b| b.id >= BookId::FIRST && seen.insert(b.id))
        {
            return;
        }

        log::warn!(
            "Repeated or zero ids in {}, renumbering",
            self.repository.path().display()
        );
        self.reassign_ids();
        self.load_warning = Some(format!(
            "Repeated or zero ids in {} were renumbered 1..{}. Save to keep the new ids.",
            self.repository.path().display(),
            self.books.len()
        ));
    }

    fn index_of(&self, id: BookId) -> LibraryResult<usize> {
        self.books
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| LibraryError::book_not_found(id.to_string()))
    }
}

fn next_id_after(books: &[Book]) -> Option<BookId> {
    match books.iter().map(|b| b.id).max() {
        Some(max) => max.next(),
        None => Some(BookId::FIRST),
    }
}

fn no_ids_left() -> LibraryError {
    LibraryError::Validation("no ids left".into())
}
