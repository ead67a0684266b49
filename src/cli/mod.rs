//! # CLI Module
//!
//! User-facing commands. Each command wires configuration, the chart scraper
//! and the Spotify client together and turns fatal errors into a red message
//! and exit code 1.
//!
//! - [`auth`] - Runs the Spotify authorization flow and caches the token
//! - [`chart`] - Prints the scraped chart for a date
//! - [`playlist`] - Resolves the chart and creates the private playlist
//!
//! ```bash
//! chartify auth
//! chartify chart --date 1999-07-10
//! chartify playlist                       # prompts for the date
//! chartify playlist --date 1999-07-10 --threshold 90
//! chartify playlist --date 1999-07-10 --no-fuzzy
//! ```

mod auth;
mod chart;
mod playlist;

pub use auth::auth;
pub use chart::chart;
pub use playlist::playlist;
