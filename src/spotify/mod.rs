//! # Spotify Integration Module
//!
//! This module is the integration layer between chartify and the Spotify Web
//! API. It covers the authorization flow, the track search used by the
//! [`resolver`](crate::resolver) and the playlist write operations used by the
//! [`pipeline`](crate::pipeline).
//!
//! ## Architecture
//!
//! ```text
//! Pipeline / Resolver
//!          ↓
//! SpotifyClient (TrackSearch + PlaylistWriter)
//!     ├── Authentication (OAuth 2.0 authorization code + PKCE)
//!     ├── Search (GET /search)
//!     └── Playlists (GET /me, POST /users/{id}/playlists, POST /playlists/{id}/tracks)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication Strategy
//!
//! 1. **Code Verifier Generation**: Creates a random verifier and its SHA256 challenge
//! 2. **Authorization Request**: Opens Spotify's consent page with the challenge,
//!    a random `state` and `show_dialog=true`
//! 3. **Local Callback**: Receives the authorization code via a temporary HTTP server
//! 4. **Token Exchange**: Exchanges code + verifier, authenticated with the client secret
//! 5. **Token Storage**: Caches the token for later runs and refreshes it when it expires
//!
//! ## Error Handling
//!
//! No request is retried. Non-success responses become
//! [`ChartifyError::Api`](crate::error::ChartifyError::Api) carrying the status
//! and response body; transport problems become `Http` errors. Whether an error
//! is fatal is decided by the caller.
//!
//! ## API Coverage
//!
//! - `GET /search` - Track search, exact (`track:` / `year:` scoped) and free text
//! - `GET /me` - Current user for playlist ownership
//! - `POST /users/{user_id}/playlists` - Create the private chart playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks, at most 100 per request
//! - `POST /api/token` - Token exchange and refresh

pub mod auth;
mod client;
pub mod playlist;
pub mod search;

pub use client::SpotifyClient;
