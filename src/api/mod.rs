//! # API Module
//!
//! HTTP endpoints served by the temporary local server during authorization.
//!
//! - [`callback`] - Receives Spotify's redirect, checks the `state` parameter
//!   and exchanges the authorization code for a token.
//! - [`health`] - Returns status and version, handy to check that the
//!   callback server is reachable at the configured address.

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
