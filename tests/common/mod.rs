#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;
use chartify::{
    Res,
    error::ChartifyError,
    pipeline::PlaylistWriter,
    resolver::{Scorer, TrackSearch},
    types::{ChartEntry, Playlist, PlaylistSpec, Track},
};

pub fn track(name: &str) -> Track {
    let id = name.to_lowercase().replace(' ', "-");
    Track {
        uri: format!("spotify:track:{id}"),
        id,
        name: name.to_string(),
    }
}

pub fn entries(titles: &[&str]) -> Vec<ChartEntry> {
    titles
        .iter()
        .enumerate()
        .map(|(i, t)| ChartEntry {
            rank: i + 1,
            title: t.to_string(),
        })
        .collect()
}

/// Search backend answering from a fixed table of query -> results.
/// Unknown queries return no results.
#[derive(Default)]
pub struct FakeSearch {
    results: HashMap<String, Vec<Track>>,
    failing: HashSet<String>,
    unauthorized: bool,
    calls: Mutex<Vec<(String, u32)>>,
}

impl FakeSearch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, query: &str, tracks: Vec<Track>) -> Self {
        self.results.insert(query.to_string(), tracks);
        self
    }

    pub fn failing(mut self, query: &str) -> Self {
        self.failing.insert(query.to_string());
        self
    }

    /// Every query fails as if the access token had been revoked.
    pub fn unauthorized(mut self) -> Self {
        self.unauthorized = true;
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrackSearch for FakeSearch {
    async fn search(&self, query: &str, limit: u32) -> Res<Vec<Track>> {
        self.calls.lock().unwrap().push((query.to_string(), limit));
        if self.unauthorized {
            return Err(ChartifyError::Auth("token revoked".to_string()));
        }
        if self.failing.contains(query) {
            return Err(ChartifyError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(self.results.get(query).cloned().unwrap_or_default())
    }
}

/// Scorer returning a fixed score per candidate name (0 for unknown names).
#[derive(Default)]
pub struct ScriptedScorer {
    scores: HashMap<String, f64>,
}

impl ScriptedScorer {
    pub fn new(scores: &[(&str, f64)]) -> Self {
        Self {
            scores: scores.iter().map(|(n, s)| (n.to_string(), *s)).collect(),
        }
    }
}

impl Scorer for ScriptedScorer {
    fn score(&self, _title: &str, candidate: &str) -> f64 {
        self.scores.get(candidate).copied().unwrap_or(0.0)
    }
}

/// Playlist writer recording every call.
#[derive(Default)]
pub struct FakeWriter {
    pub created: Mutex<Vec<(String, PlaylistSpec)>>,
    pub added: Mutex<Vec<(String, Vec<String>)>>,
    pub fail_create: bool,
    pub unauthorized: bool,
}

#[async_trait]
impl PlaylistWriter for FakeWriter {
    async fn current_user_id(&self) -> Res<String> {
        if self.unauthorized {
            return Err(ChartifyError::Auth("token refresh failed".to_string()));
        }
        Ok("listener".to_string())
    }

    async fn create_playlist(&self, owner_id: &str, spec: &PlaylistSpec) -> Res<Playlist> {
        if self.fail_create {
            return Err(ChartifyError::Api {
                status: 403,
                message: "insufficient scope".to_string(),
            });
        }
        self.created
            .lock()
            .unwrap()
            .push((owner_id.to_string(), spec.clone()));
        Ok(Playlist {
            id: "playlist-1".to_string(),
            name: spec.name.clone(),
            public: Some(spec.public),
        })
    }

    async fn add_tracks(&self, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.added
            .lock()
            .unwrap()
            .push((playlist_id.to_string(), uris.to_vec()));
        Ok(())
    }
}
