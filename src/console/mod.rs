//! Interactive text console
//!
//! A menu loop that drives a [`Library`] one command at a time. Errors from
//! any command are printed and the loop returns to the menu; only the quit
//! command or the end of input leaves it.

pub mod prompt;

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::display::{format_book_summary, format_book_table};
use crate::error::{LibraryError, LibraryResult};
use crate::models::{current_year, BookEdit, BookId, NewBook, SortKey};
use crate::services::Library;

pub use prompt::Prompter;

const BANNER: &str = "=== * BOOKSHELF * ===";

/// A menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ViewAll,
    Add,
    Edit,
    Delete,
    Search,
    Sort,
    Export,
    Seed,
    Clear,
    Reload,
    Save,
    Quit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "1" => Ok(Self::ViewAll),
            "2" => Ok(Self::Add),
            "3" => Ok(Self::Edit),
            "4" => Ok(Self::Delete),
            "5" => Ok(Self::Search),
            "6" => Ok(Self::Sort),
            "7" => Ok(Self::Export),
            "8" => Ok(Self::Seed),
            "9" => Ok(Self::Clear),
            "R" => Ok(Self::Reload),
            "S" => Ok(Self::Save),
            "Q" => Ok(Self::Quit),
            _ => Err(()),
        }
    }
}

/// Whether the menu loop keeps going
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Console session owning the library
pub struct Console<R, W> {
    prompter: Prompter<R, W>,
    library: Library,
    export_path: PathBuf,
    show_welcome: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(library: Library, export_path: PathBuf, input: R, output: W) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            library,
            export_path,
            show_welcome: true,
        }
    }

    /// Toggle the welcome banner
    pub fn with_welcome(mut self, show_welcome: bool) -> Self {
        self.show_welcome = show_welcome;
        self
    }

    /// End the session, returning the library and output sink
    pub fn into_parts(self) -> (Library, W) {
        (self.library, self.prompter.into_output())
    }

    /// Run the menu loop until quit or end of input
    pub fn run(&mut self) -> LibraryResult<()> {
        self.welcome()?;

        loop {
            match self.step() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => return Ok(()),
                Err(LibraryError::InputClosed) => {
                    log::debug!("Input closed, leaving menu");
                    // Nothing to answer prompts with, so unsaved changes are dropped
                    if self.library.is_dirty() {
                        self.prompter.say("")?;
                        self.prompter.say("[!] Input closed. Unsaved changes were not saved.")?;
                    }
                    return Ok(());
                }
                Err(e) => self.prompter.say(format!("[!] {}", e))?,
            }
        }
    }

    fn welcome(&mut self) -> LibraryResult<()> {
        if self.show_welcome {
            let file = self.data_file_name();
            self.prompter.say(BANNER)?;
            self.prompter.say("")?;
            self.prompter.say(format!(
                "* TIP: You can open {} in any editor to inspect saved data. *",
                file
            ))?;
        }

        if let Some(warning) = self.library.load_warning().map(str::to_string) {
            self.prompter.say(format!("[!] {}", warning))?;
        }

        Ok(())
    }

    fn step(&mut self) -> LibraryResult<Flow> {
        self.show_menu()?;
        let answer = self.prompter.read_line("Choose an Option: ")?;
        self.prompter.say("")?;

        let Ok(choice) = answer.parse::<MenuChoice>() else {
            self.prompter.say("Unknown option. Please choose from the menu.")?;
            return Ok(Flow::Continue);
        };

        match choice {
            MenuChoice::ViewAll => self.view_all()?,
            MenuChoice::Add => self.add_book()?,
            MenuChoice::Edit => self.edit_book()?,
            MenuChoice::Delete => self.delete_book()?,
            MenuChoice::Search => self.search_books()?,
            MenuChoice::Sort => self.sort_books()?,
            MenuChoice::Export => self.export_csv()?,
            MenuChoice::Seed => self.seed()?,
            MenuChoice::Clear => self.clear_all()?,
            MenuChoice::Reload => self.reload()?,
            MenuChoice::Save => self.save_if_dirty()?,
            MenuChoice::Quit => {
                self.save_if_dirty()?;
                self.prompter.say("Goodbye!")?;
                return Ok(Flow::Quit);
            }
        }

        Ok(Flow::Continue)
    }

    fn show_menu(&mut self) -> LibraryResult<()> {
        let status = format!(
            "Items: {} | File: {} | Unsaved changes: {}",
            self.library.len(),
            self.data_file_name(),
            if self.library.is_dirty() { "YES" } else { "NO" }
        );

        let p = &mut self.prompter;
        p.say("")?;
        p.say(BANNER)?;
        p.say(status)?;
        p.say("----------------------")?;
        p.say("[1] View All")?;
        p.say("[2] Add")?;
        p.say("[3] Edit")?;
        p.say("[4] Delete")?;
        p.say("[5] Search")?;
        p.say("[6] Sort")?;
        p.say("[7] Export to CSV")?;
        p.say("[8] Seed Sample Data")?;
        p.say("[9] Clear Library")?;
        p.say("[R] Reload from Disk")?;
        p.say("[S] Save")?;
        p.say("[Q] Quit")
    }

    fn data_file_name(&self) -> String {
        let path = self.library.repository().path();
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    }

    fn list(&mut self) -> LibraryResult<()> {
        let table = format_book_table(self.library.books());
        self.prompter.say(table)
    }

    fn view_all(&mut self) -> LibraryResult<()> {
        self.list()?;
        self.prompter.pause()
    }

    fn add_book(&mut self) -> LibraryResult<()> {
        self.prompter.say("Add a New Book\n===")?;

        let max_year = current_year();
        let input = NewBook {
            title: self.prompter.non_empty("Title: ")?,
            author: self.prompter.non_empty("Author: ")?,
            year: self
                .prompter
                .number_in_range(&format!("Year (0-{}): ", max_year), 0, max_year)?,
            genre: self.prompter.optional("Genre (Optional): ")?,
        };

        let book = self.library.add(input)?;
        self.prompter.say(format!("Book added with ID {}.", book.id))
    }

    /// Ask for the id of an existing book, or report that it doesn't exist
    fn prompt_existing_id(&mut self, label: &str) -> LibraryResult<Option<BookId>> {
        self.list()?;
        let raw = self.prompter.number_in_range(label, 1, u32::MAX)?;
        let id = BookId::new(raw);

        if self.library.get(id).is_none() {
            self.prompter.say("Not found.")?;
            return Ok(None);
        }
        Ok(Some(id))
    }

    fn edit_book(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("Nothing to edit.");
        }

        let Some(id) = self.prompt_existing_id("Enter ID of the book to edit: ")? else {
            return Ok(());
        };
        let Some(current) = self.library.get(id).cloned() else {
            return Err(LibraryError::book_not_found(id.to_string()));
        };

        self.prompter.say("Leave blank to keep current value.")?;
        let max_year = current_year();
        let edit = BookEdit {
            title: Some(
                self.prompter
                    .with_default(&format!("Title [{}]: ", current.title), &current.title)?,
            ),
            author: Some(
                self.prompter
                    .with_default(&format!("Author [{}]: ", current.author), &current.author)?,
            ),
            year: Some(self.prompter.number_with_default(
                &format!("Year [{}]: ", current.year),
                0,
                max_year,
                current.year,
            )?),
            genre: Some(self.prompter.read_line(&format!(
                "Genre [{}] (blank clears): ",
                current.genre.as_deref().unwrap_or("none")
            ))?),
        };

        self.library.edit(id, &edit)?;
        self.prompter.say("Updated.")
    }

    fn delete_book(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("Nothing to delete.");
        }

        let Some(id) = self.prompt_existing_id("Enter ID of the book to delete: ")? else {
            return Ok(());
        };
        let Some(book) = self.library.get(id).cloned() else {
            return Err(LibraryError::book_not_found(id.to_string()));
        };

        let label = format!("Delete \"{}\" by {}? [y/N] ", book.title, book.author);
        if self.prompter.confirm(&label)? {
            let removed = self.library.delete(id)?;
            self.prompter.say(format!("Deleted {}.", format_book_summary(&removed)))
        } else {
            self.prompter.say("Cancelled.")
        }
    }

    fn search_books(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("No data to search.");
        }

        let term = self.prompter.non_empty("Search term (Title/Author/Genre): ")?;
        let hits = self.library.search(&term);
        let summary = format!("Found {} result(s).", hits.len());
        let table = format_book_table(hits);

        self.prompter.say(summary)?;
        self.prompter.say(table)?;
        self.prompter.pause()
    }

    fn sort_books(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("Nothing to sort.");
        }

        self.prompter.say("Sort by: T)itle  A)uthor  Y)ear  G)enre")?;
        let key = self
            .prompter
            .read_line("> ")?
            .parse::<SortKey>()
            .unwrap_or_default();
        let descending = self.prompter.confirm("Descending? [y/N] ")?;

        self.library.sort(key, descending);
        self.prompter.say("Sorted.")?;
        self.list()?;
        self.prompter.pause()
    }

    fn export_csv(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("[!] No data to export.");
        }

        match self.library.export_csv(&self.export_path) {
            Ok(count) => self.prompter.say(format!(
                "Exported {} book(s) to {}",
                count,
                self.export_path.display()
            )),
            Err(e) => {
                log::warn!("Export failed: {}", e);
                self.prompter.say(format!("[!] Export failed: {}", e))
            }
        }
    }

    fn seed(&mut self) -> LibraryResult<()> {
        if !self.library.is_empty()
            && !self
                .prompter
                .confirm("This will add sample books to your existing list. Continue? [y/N] ")?
        {
            return self.prompter.say("Cancelled.");
        }

        let added = self.library.seed_samples()?;
        self.prompter.say(format!("Sample data added ({} books).", added))
    }

    fn clear_all(&mut self) -> LibraryResult<()> {
        if self.library.is_empty() {
            return self.prompter.say("Already empty.");
        }
        if !self
            .prompter
            .confirm("[!] This will remove ALL books. Are you sure? [y/N] ")?
        {
            return self.prompter.say("Cancelled.");
        }

        self.library.clear();
        self.prompter.say("Cleared.")
    }

    fn reload(&mut self) -> LibraryResult<()> {
        if self.library.is_dirty()
            && !self
                .prompter
                .confirm("[!] Discard unsaved changes and reload from disk? [y/N] ")?
        {
            return self.prompter.say("Cancelled.");
        }

        let file = self.data_file_name();
        match self.library.reload() {
            Ok(count) => {
                self.prompter
                    .say(format!("Reloaded {} book(s) from {}.", count, file))?;
                if let Some(warning) = self.library.load_warning().map(str::to_string) {
                    self.prompter.say(format!("[!] {}", warning))?;
                }
                Ok(())
            }
            Err(e) => self.prompter.say(format!("[!] Reload failed: {}", e)),
        }
    }

    fn save_if_dirty(&mut self) -> LibraryResult<()> {
        if !self.library.is_dirty() {
            return self.prompter.say("No unsaved changes.");
        }
        if !self
            .prompter
            .confirm("[!] You have unsaved changes. Save? [y/N] ")?
        {
            return Ok(());
        }

        let file = self.data_file_name();
        match self.library.save() {
            Ok(count) => self.prompter.say(format!("Saved {} book(s) to {}.", count, file)),
            Err(e) => {
                log::warn!("Save failed: {}", e);
                self.prompter.say(format!("[!] Save failed: {}", e))
            }
        }
    }
}
