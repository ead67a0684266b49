use chrono::Utc;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

/// Raw body of the Spotify token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: String,
    #[serde(default = "default_expires_in")]
    pub expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

impl TokenResponse {
    /// Converts the response into a cacheable token.
    ///
    /// Refresh responses may omit the refresh token, in which case the
    /// previous one stays valid and is carried over.
    pub fn into_token(self, previous_refresh_token: Option<&str>) -> Token {
        Token {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .or_else(|| previous_refresh_token.map(str::to_string))
                .unwrap_or_default(),
            scope: self.scope,
            expires_in: self.expires_in,
            obtained_at: Utc::now().timestamp() as u64,
        }
    }
}

/// State shared between the authorization flow and the callback handler.
#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub state: String,
    pub token: Option<Token>,
}

/// One title of the scraped chart, `rank` is its 1-based position on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartEntry {
    pub rank: usize,
    pub title: String,
}

#[derive(Tabled)]
pub struct ChartTableRow {
    pub rank: usize,
    pub title: String,
}

/// A catalog search candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub tracks: Tracks,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Name and visibility of the playlist created for a chart date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistSpec {
    pub name: String,
    pub description: String,
    pub public: bool,
}

impl PlaylistSpec {
    /// Builds the playlist spec for a chart date, e.g. `1999-07-10 Billboard 100`.
    pub fn for_date(date: &str) -> Self {
        Self {
            name: format!("{date} Billboard 100"),
            description: format!("Billboard Hot 100 for the week of {date}"),
            public: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
    pub collaborative: bool,
}

impl From<&PlaylistSpec> for CreatePlaylistRequest {
    fn from(spec: &PlaylistSpec) -> Self {
        Self {
            name: spec.name.clone(),
            description: spec.description.clone(),
            public: spec.public,
            collaborative: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub public: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}
