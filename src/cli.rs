//! Command-line interface parsing for reelscout
//!
//! Parses arguments with clap, then resolves the loosely-typed strings
//! (list names, trending window, image size) into a typed `Request`.

use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::data::{ImageSize, MovieList, TimeWindow};

/// Error types for CLI argument parsing
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CliError {
    /// The list name is not recognized
    #[error("Invalid list: '{0}'. Valid lists: popular, trending, top-rated, now-playing, upcoming")]
    InvalidList(String),

    /// The trending window is not recognized
    #[error("Invalid time window: '{0}'. Valid windows: day, week")]
    InvalidWindow(String),

    /// The image size token is not recognized
    #[error("Invalid image size: '{0}'. Valid sizes: w200, w300, w500, w780, original")]
    InvalidImageSize(String),

    /// An empty search query
    #[error("Search query must not be empty")]
    EmptyQuery,
}

/// reelscout - browse, search and inspect movies from TMDB
#[derive(Parser, Debug)]
#[command(name = "reelscout")]
#[command(about = "Browse, search and inspect movies from TMDB")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show every movie list side by side
    Home,

    /// Show one movie list
    ///
    /// Valid lists: popular, trending, top-rated, now-playing, upcoming
    List {
        /// Which list to show
        #[arg(value_name = "LIST")]
        list: String,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,

        /// Trending window (day or week); only used by the trending list
        #[arg(long, default_value = "week")]
        window: String,
    },

    /// Search movies by title
    Search {
        query: String,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Show details, cast and trailer for a movie
    Details { id: u64 },

    /// Movies similar to the given one
    Similar {
        id: u64,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Movies recommended for fans of the given one
    Recommended {
        id: u64,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// Print the image URL for a TMDB image path
    Image {
        /// Path such as /abc.jpg; omitted paths print the placeholder
        path: Option<String>,

        #[arg(long, default_value = "w500")]
        size: String,
    },
}

/// What the user asked for, with every argument validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Home,
    List {
        list: MovieList,
        page: u32,
        window: TimeWindow,
    },
    Search {
        query: String,
        page: u32,
    },
    Details {
        id: u64,
    },
    Similar {
        id: u64,
        page: u32,
    },
    Recommended {
        id: u64,
        page: u32,
    },
    Image {
        path: Option<String>,
        size: ImageSize,
    },
}

/// Parses a list name argument into a MovieList.
pub fn parse_list_arg(s: &str) -> Result<MovieList, CliError> {
    MovieList::from_str(s).ok_or_else(|| CliError::InvalidList(s.to_string()))
}

pub fn parse_window_arg(s: &str) -> Result<TimeWindow, CliError> {
    TimeWindow::from_str(s).ok_or_else(|| CliError::InvalidWindow(s.to_string()))
}

pub fn parse_size_arg(s: &str) -> Result<ImageSize, CliError> {
    ImageSize::from_str(s).ok_or_else(|| CliError::InvalidImageSize(s.to_string()))
}

impl Request {
    /// Creates a Request from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(Request)` with typed arguments
    /// * `Err(CliError)` if a list, window or size name is unknown, or the
    ///   search query is blank
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let request = match &cli.command {
            Command::Home => Request::Home,
            Command::List { list, page, window } => Request::List {
                list: parse_list_arg(list)?,
                page: *page,
                window: parse_window_arg(window)?,
            },
            Command::Search { query, page } => {
                let query = query.trim();
                if query.is_empty() {
                    return Err(CliError::EmptyQuery);
                }
                Request::Search {
                    query: query.to_string(),
                    page: *page,
                }
            }
            Command::Details { id } => Request::Details { id: *id },
            Command::Similar { id, page } => Request::Similar { id: *id, page: *page },
            Command::Recommended { id, page } => Request::Recommended { id: *id, page: *page },
            Command::Image { path, size } => Request::Image {
                path: path.clone(),
                size: parse_size_arg(size)?,
            },
        };
        Ok(request)
    }
}
