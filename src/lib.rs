//! Billboard Hot 100 to Spotify playlist library
//!
//! This library scrapes the Billboard Hot 100 chart for a given date, resolves
//! every chart title to a Spotify track and collects the matches into a private
//! playlist. The title resolution (exact search first, fuzzy fallback second)
//! lives in [`resolver`] and is independent of the Spotify client so it can be
//! exercised against any search backend.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints for the local OAuth callback server
//! - `chart` - Billboard chart download and HTML extraction
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration loaded once from the environment
//! - `error` - Error type shared across the crate
//! - `management` - Token cache management
//! - `pipeline` - Chart to playlist orchestration
//! - `resolver` - Exact/fuzzy title resolution
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers

pub mod api;
pub mod chart;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod pipeline;
pub mod resolver;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Every fallible operation in the crate reports a [`error::ChartifyError`],
/// which keeps the two error tiers (per title and per run) on one type while
/// letting callers match on the variant.
///
/// # Example
///
/// ```
/// use chartify::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, error::ChartifyError>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Fetching chart for {}", date);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Playlist '{}' created successfully!", name);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only used for fatal, run-level failures: the process terminates with exit
/// code 1 right after the message is printed.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a chart title that could not be
/// matched to a track.
///
/// # Example
///
/// ```
/// warning!("{} not found, even with fuzzy search.", title);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
