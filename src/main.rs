//! Command line driver.
//!
//! A thin front end over the library: every command builds a [`Session`] with
//! [`cinefile::initialize`], feeds it [`Event`]s, waits for the worker, and
//! prints the resulting state as plain text.
//!
//! ```text
//! cinefile search "nolan" --genre Drama --page 1
//! cinefile detail tt0816692
//! cinefile browse
//! cinefile category action
//! cinefile favorites add tt0137523
//! ```

#![allow(clippy::multiple_crate_versions)]

use cinefile::catalog::{get_by_category, get_detail, home_rows, GENRES};
use cinefile::domain::{CatalogEntry, Category, MovieDetail, MovieSummary};
use cinefile::{initialize, CinefileError, Config, Event, Result, Session};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

/// How long a command waits for the worker before giving up.
const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Parser)]
#[command(name = "cinefile")]
#[command(about = "Search a movie catalog and keep a list of favorites", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory for favorites and the log file
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// JSON catalog to use instead of the built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Verbose logging to the log file
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search titles, genres, directors, and actors
    Search {
        /// Text to look for (case-insensitive)
        #[arg(default_value = "")]
        text: String,

        /// Only movies with this genre
        #[arg(short, long, default_value = "")]
        genre: String,

        /// Result page, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show everything known about one movie
    Detail {
        id: String,
    },

    /// Show the home screen rows
    Browse,

    /// List the movies tagged with a category
    Category {
        /// trending, popular, new, action, drama, comedy, horror, sci-fi, romance, thriller
        category: Category,
    },

    /// List the genres offered for filtering
    Genres,

    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(Subcommand)]
enum FavoritesCommand {
    /// Print every favorite
    List,
    /// Add a catalog movie by id
    Add { id: String },
    /// Remove a favorite by id
    Remove { id: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    cinefile::observability::init_tracing(&config);

    let _span = tracing::debug_span!("cli").entered();
    let mut session = initialize(&config)?;

    match cli.command {
        Commands::Search { text, genre, page } => run_search(&mut session, text, genre, page)?,
        Commands::Detail { id } => run_detail(&mut session, id)?,
        Commands::Browse => {
            for row in home_rows(session.catalog()) {
                println!("== {} ==", row.title());
                for entry in &row.entries {
                    print_entry(entry);
                }
                println!();
            }
        }
        Commands::Category { category } => {
            let entries = get_by_category(session.catalog(), category);
            println!("== {} ==", category.title());
            if entries.is_empty() {
                println!("(nothing here yet)");
            }
            for entry in &entries {
                print_entry(entry);
            }
        }
        Commands::Genres => {
            for genre in GENRES {
                println!("{genre}");
            }
        }
        Commands::Favorites { action } => run_favorites(&mut session, action)?,
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(catalog) = &cli.catalog {
        config.catalog_file = Some(catalog.clone());
    }
    if cli.verbose {
        config.trace_level = Some("debug".to_string());
    }
    Ok(config)
}

fn run_search(session: &mut Session, text: String, genre: String, page: usize) -> Result<()> {
    session.send(Event::GenreSelected(genre))?;
    session.send(Event::SearchTextChanged(text))?;
    if page > 1 {
        session.send(Event::PageRequested(page))?;
    }
    session.wait_idle(QUERY_TIMEOUT)?;

    let state = session.store().state();
    if let Some(message) = &state.last_error {
        println!("{message}");
        return Ok(());
    }
    if state.search_text.trim().is_empty() && state.genre_filter.trim().is_empty() {
        println!("Type something to search, or pick a genre.");
        return Ok(());
    }

    println!(
        "{} result(s), page {} of {}",
        state.total_results,
        state.current_page,
        state.total_pages().max(1)
    );
    for movie in &state.results {
        let star = if state.is_favorite(&movie.id) { "*" } else { " " };
        println!("{star} {}", summary_line(movie));
    }

    let window = state.page_window();
    if !window.is_empty() {
        let pages: Vec<String> = window
            .iter()
            .map(|p| if *p == state.current_page { format!("[{p}]") } else { p.to_string() })
            .collect();
        println!("pages: {}", pages.join(" "));
    }
    Ok(())
}

fn run_detail(session: &mut Session, id: String) -> Result<()> {
    session.send(Event::SelectMovie(id.clone()))?;
    session.wait_idle(QUERY_TIMEOUT)?;

    match &session.store().state().selected_detail {
        Some(detail) => print_detail(detail, session.store().is_favorite(&id)),
        None => println!("No movie with id {id}"),
    }
    Ok(())
}

fn run_favorites(session: &mut Session, action: FavoritesCommand) -> Result<()> {
    match action {
        FavoritesCommand::List => {
            let favorites = session.store().favorites();
            if favorites.is_empty() {
                println!("No favorites yet.");
            }
            for movie in favorites {
                println!("{}", summary_line(movie));
            }
        }
        FavoritesCommand::Add { id } => {
            let movie = get_detail(session.catalog(), &id)
                .map(|detail| detail.summary)
                .ok_or_else(|| CinefileError::Catalog(format!("no movie with id {id}")))?;
            let title = movie.title.clone();
            if session.send(Event::AddFavorite(movie))? {
                println!("Added {title}");
            } else {
                println!("{title} is already a favorite");
            }
        }
        FavoritesCommand::Remove { id } => {
            if session.send(Event::RemoveFavorite(id.clone()))? {
                println!("Removed {id}");
            } else {
                println!("{id} is not a favorite");
            }
        }
    }
    Ok(())
}

fn summary_line(movie: &MovieSummary) -> String {
    format!("{}  {} ({})", movie.id, movie.title, movie.year)
}

fn print_entry(entry: &CatalogEntry) {
    let progress = entry
        .curation
        .continue_watching
        .map(|p| format!("  [{}% watched]", p.percentage))
        .unwrap_or_default();
    println!("  {}{progress}", summary_line(entry.summary()));
}

fn print_detail(detail: &MovieDetail, favorite: bool) {
    let summary = &detail.summary;
    println!("{} ({}){}", summary.title, summary.year, if favorite { "  *favorite*" } else { "" });
    println!("id:       {}", summary.id);
    if let Some(runtime) = detail.runtime_minutes {
        println!("runtime:  {runtime} min");
    }
    println!("genres:   {}", detail.genre_line());
    println!("director: {}", detail.director);
    println!("cast:     {}", detail.actor_line());
    if let Some(rating) = detail.imdb_rating {
        println!("imdb:     {rating:.1}");
    }
    for rating in &detail.ratings {
        println!("          {}: {}", rating.source, rating.value);
    }
    if let Some(poster) = summary.poster() {
        println!("poster:   {poster}");
    }
    if !detail.plot.is_empty() {
        println!();
        println!("{}", detail.plot);
    }
}
