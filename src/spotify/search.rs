use async_trait::async_trait;

use crate::{
    Res,
    resolver::TrackSearch,
    spotify::SpotifyClient,
    types::{SearchResponse, Track},
};

#[async_trait]
impl TrackSearch for SpotifyClient {
    /// Runs a `type=track` search and returns the candidates in Spotify's
    /// ranking order.
    async fn search(&self, query: &str, limit: u32) -> Res<Vec<Track>> {
        let limit = limit.to_string();
        let response: SearchResponse = self
            .get(
                "/search",
                &[("q", query), ("type", "track"), ("limit", limit.as_str())],
            )
            .await?;

        Ok(response.tracks.items)
    }
}
