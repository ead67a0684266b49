//! Configuration management for chartify.
//!
//! Configuration is read once at startup into a [`Config`] value which is then
//! passed by reference to whichever component needs it. Business logic never
//! reads the process environment directly.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (for everything except the three Spotify secrets)

use std::{env, path::PathBuf};

use crate::{Res, error::ChartifyError};

/// OAuth scope requested from Spotify. Playlists are always created private.
pub const SPOTIFY_SCOPE: &str = "playlist-modify-private";

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8888";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_API_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_API_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_CHART_URL: &str = "https://www.billboard.com/charts/hot-100";

/// Runtime configuration for a single chartify invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Client ID of the registered Spotify application.
    pub client_id: String,
    /// Client secret of the registered Spotify application.
    pub client_secret: String,
    /// Redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    /// Address the local OAuth callback server binds to.
    pub server_addr: String,
    pub api_url: String,
    pub auth_url: String,
    pub token_url: String,
    /// Base URL of the chart; the date is appended as the last path segment.
    pub chart_url: String,
    /// Location of the cached OAuth token.
    pub token_cache: PathBuf,
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// Call [`load_env`] first so values from the `.env` file are visible.
    ///
    /// # Errors
    ///
    /// Returns [`ChartifyError::Config`] naming the first missing secret when
    /// `SPOTIFY_API_AUTH_CLIENT_ID`, `SPOTIFY_API_AUTH_CLIENT_SECRET` or
    /// `SPOTIFY_API_REDIRECT_URI` is not set.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Blank values are treated as missing.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| non_blank(lookup(key));
        let required = |key: &str| {
            get(key).ok_or_else(|| ChartifyError::Config(format!("{key} must be set")))
        };

        Ok(Self {
            client_id: required("SPOTIFY_API_AUTH_CLIENT_ID")?,
            client_secret: required("SPOTIFY_API_AUTH_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_API_REDIRECT_URI")?,
            server_addr: get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.into()),
            api_url: get("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_SPOTIFY_API_URL.into()),
            auth_url: get("SPOTIFY_API_AUTH_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_AUTH_URL.into()),
            token_url: get("SPOTIFY_API_TOKEN_URL")
                .unwrap_or_else(|| DEFAULT_SPOTIFY_API_TOKEN_URL.into()),
            chart_url: chart_base(&lookup),
            token_cache: get("TOKEN_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(default_token_cache),
        })
    }
}

/// Chart base URL, the only setting needed without Spotify access.
pub fn chart_base_url() -> String {
    chart_base(&|key: &str| env::var(key).ok())
}

fn chart_base<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_blank(lookup("CHART_URL")).unwrap_or_else(|| DEFAULT_CHART_URL.into())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Returns the platform-specific data directory used by chartify.
///
/// - Linux: `~/.local/share/chartify`
/// - macOS: `~/Library/Application Support/chartify`
/// - Windows: `%LOCALAPPDATA%/chartify`
pub fn data_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("chartify");
    path
}

fn default_token_cache() -> PathBuf {
    data_dir().join("cache/token.json")
}

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the data directory if it doesn't exist. A missing `.env` file is
/// not an error: the variables may come from the process environment instead.
///
/// # Errors
///
/// Returns an error string if the directory cannot be created or the file
/// exists but cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = data_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    // a .env in the working directory wins over the one in the data directory
    if let Err(e) = dotenv::dotenv() {
        if !e.not_found() {
            return Err(e.to_string());
        }
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }
    Ok(())
}
