use std::sync::Arc;

use reqwest::{Client, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::Mutex;

use crate::{
    Res, config::Config, error::ChartifyError, info, management::TokenManager, spotify::auth,
};

/// Authenticated Spotify Web API client shared by the search and playlist
/// phases of a run.
pub struct SpotifyClient {
    http: Client,
    config: Arc<Config>,
    tokens: Mutex<TokenManager>,
}

impl SpotifyClient {
    pub fn new(config: Arc<Config>, tokens: TokenManager) -> Self {
        Self {
            http: Client::new(),
            config,
            tokens: Mutex::new(tokens),
        }
    }

    /// Creates a client from the cached token, running the authorization
    /// flow first when no usable token is cached.
    pub async fn connect(config: Arc<Config>) -> Res<Self> {
        let tokens = match TokenManager::load(&config.token_cache).await {
            Ok(tokens) => tokens,
            Err(e) => {
                log::debug!("No cached token at {}: {e}", config.token_cache.display());
                info!("No cached Spotify token found, starting authorization.");
                let token = auth::auth(Arc::clone(&config)).await?;
                TokenManager::new(token, config.token_cache.clone())
            }
        };

        Ok(Self::new(config, tokens))
    }

    async fn access_token(&self) -> Res<String> {
        let mut tokens = self.tokens.lock().await;
        tokens.get_valid_token(&self.config).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_url.trim_end_matches('/'), path)
    }

    pub(crate) async fn get<T>(&self, path: &str, query: &[(&str, &str)]) -> Res<T>
    where
        T: DeserializeOwned,
    {
        let token = self.access_token().await?;
        let url = self.url(path);
        log::debug!("GET {url} {query:?}");

        let response = self
            .http
            .get(&url)
            .query(query)
            .bearer_auth(token)
            .send()
            .await?;
        decode(response).await
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Res<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let token = self.access_token().await?;
        let url = self.url(path);
        log::debug!("POST {url}");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Res<T> {
    let status = response.status();
    if status == StatusCode::UNAUTHORIZED {
        let message = response.text().await.unwrap_or_default();
        return Err(ChartifyError::Auth(format!(
            "access token rejected by Spotify: {message}"
        )));
    }
    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(ChartifyError::Api {
            status: status.as_u16(),
            message,
        });
    }

    Ok(response.json::<T>().await?)
}
