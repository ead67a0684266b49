use thiserror::Error;

/// Error type for every fallible operation in chartify.
///
/// Errors fall into two tiers. Failures while searching for a single chart
/// title are caught by the [`Resolver`](crate::resolver::Resolver) and turned
/// into an unresolved outcome. Everything else (configuration, authentication,
/// playlist creation) ends the run.
#[derive(Error, Debug)]
pub enum ChartifyError {
    /// A required setting is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network or transport level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Spotify answered with a non-success status code.
    #[error("Spotify API returned {status}: {message}")]
    Api { status: u16, message: String },

    /// OAuth flow or token refresh failed.
    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// User supplied a date that is not `YYYY-MM-DD`.
    #[error("Invalid date '{0}', expected the format YYYY-MM-DD")]
    InvalidDate(String),
}
