use std::slice::Chunks;

use async_trait::async_trait;

use crate::{
    Res,
    pipeline::PlaylistWriter,
    spotify::SpotifyClient,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CurrentUser, Playlist, PlaylistSpec,
    },
};

/// Maximum number of items Spotify accepts per add-tracks request.
pub const MAX_TRACKS_PER_REQUEST: usize = 100;

/// Splits track URIs into request-sized batches, keeping their order.
pub fn batches(uris: &[String]) -> Chunks<'_, String> {
    uris.chunks(MAX_TRACKS_PER_REQUEST)
}

impl SpotifyClient {
    pub async fn current_user(&self) -> Res<CurrentUser> {
        self.get("/me", &[]).await
    }

    pub async fn create(&self, owner_id: &str, spec: &PlaylistSpec) -> Res<Playlist> {
        let body = CreatePlaylistRequest::from(spec);
        self.post(&format!("/users/{owner_id}/playlists"), &body)
            .await
    }

    /// Adds the tracks in order, one request per batch. A failing batch stops
    /// the remaining ones.
    pub async fn append_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        let path = format!("/playlists/{playlist_id}/tracks");
        for batch in batches(uris) {
            let body = AddTrackToPlaylistRequest {
                uris: batch.to_vec(),
            };
            let response: AddTrackToPlaylistResponse = self.post(&path, &body).await?;
            log::debug!(
                "Added {} tracks to {playlist_id}, snapshot {}",
                batch.len(),
                response.snapshot_id
            );
        }
        Ok(())
    }
}

#[async_trait]
impl PlaylistWriter for SpotifyClient {
    async fn current_user_id(&self) -> Res<String> {
        Ok(self.current_user().await?.id)
    }

    async fn create_playlist(&self, owner_id: &str, spec: &PlaylistSpec) -> Res<Playlist> {
        self.create(owner_id, spec).await
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.append_tracks(playlist_id, uris).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batches_keep_order_and_cap_size() {
        let uris: Vec<String> = (0..250).map(|i| format!("spotify:track:{i}")).collect();
        let sizes: Vec<usize> = batches(&uris).map(|b| b.len()).collect();
        assert_eq!(sizes, vec![100, 100, 50]);

        let flattened: Vec<String> = batches(&uris).flatten().cloned().collect();
        assert_eq!(flattened, uris);
    }

    #[test]
    fn no_batches_for_empty_input() {
        assert_eq!(batches(&[]).count(), 0);
    }
}
