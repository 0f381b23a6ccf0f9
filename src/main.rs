use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use bookshelf::config::{paths::DATA_DIR_ENV, LibraryPaths, Settings};
use bookshelf::console::Console;
use bookshelf::display::format_book_table;
use bookshelf::models::{Book, SortKey};
use bookshelf::services::Library;
use bookshelf::storage::BookRepository;

#[derive(Parser)]
#[command(
    name = "bookshelf",
    version,
    about = "Terminal-based personal library catalog",
    long_about = "Bookshelf keeps a list of your books (title, author, year, genre) \
                  in a JSON file you can also edit by hand, with search, sorting, \
                  and CSV export from an interactive menu."
)]
struct Cli {
    /// Directory holding books.json and the settings file
    #[arg(long, global = true, env = DATA_DIR_ENV)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive menu (default)
    #[command(alias = "ui")]
    Menu,

    /// Print the book list
    List {
        /// Only show books matching this term
        #[arg(short, long)]
        search: Option<String>,
        /// Order the output by title, author, year, or genre (not saved)
        #[arg(long)]
        sort: Option<SortKey>,
        /// Reverse the sort order
        #[arg(long, requires = "sort")]
        desc: bool,
    },

    /// Export the book list to CSV
    Export {
        /// Output path (defaults to books.csv in the data directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show current configuration and paths
    Config {
        /// Turn the welcome banner on or off and save the setting
        #[arg(long, value_name = "BOOL")]
        set_welcome: Option<bool>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    let cli = Cli::parse();

    let paths = LibraryPaths::resolve(cli.data_dir)?;
    let mut settings = Settings::load_or_create(&paths)?;
    let repository = BookRepository::new(paths.books_file(&settings));

    match cli.command {
        None | Some(Commands::Menu) => {
            let library = Library::open(repository);
            let stdin = io::stdin();
            let mut console = Console::new(
                library,
                paths.export_file(&settings),
                stdin.lock(),
                io::stdout(),
            )
            .with_welcome(settings.show_welcome);
            console.run().context("Console session failed")?;
        }
        Some(Commands::List { search, sort, desc }) => {
            let library = Library::open(repository);
            if let Some(warning) = library.load_warning() {
                eprintln!("[!] {}", warning);
            }

            let mut view: Vec<&Book> = match &search {
                Some(term) => library.search(term),
                None => library.books().iter().collect(),
            };
            // View only, the stored order is left alone
            if let Some(key) = sort {
                view.sort_by(|a, b| key.ordering(a, b, desc));
            }

            if search.is_some() {
                println!("Found {} result(s).", view.len());
            }
            println!("{}", format_book_table(view));
        }
        Some(Commands::Export { output }) => {
            let library = Library::open(repository);
            if let Some(warning) = library.load_warning() {
                eprintln!("[!] {}", warning);
            }
            let output = output.unwrap_or_else(|| paths.export_file(&settings));
            let count = library
                .export_csv(&output)
                .with_context(|| format!("Failed to export to {}", output.display()))?;
            println!("Exported {} book(s) to {}", count, output.display());
        }
        Some(Commands::Config { set_welcome }) => {
            if let Some(show_welcome) = set_welcome {
                settings.show_welcome = show_welcome;
                settings
                    .save(&paths)
                    .context("Failed to save settings")?;
                println!("Saved {}", paths.settings_file().display());
                println!();
            }

            println!("Bookshelf Configuration");
            println!("=======================");
            println!("Data directory: {}", paths.base_dir().display());
            println!("Settings file:  {}", paths.settings_file().display());
            println!("Data file:      {}", paths.books_file(&settings).display());
            println!("Export file:    {}", paths.export_file(&settings).display());
            println!();
            println!("Settings:");
            println!("  Show welcome: {}", settings.show_welcome);
        }
    }

    Ok(())
}
