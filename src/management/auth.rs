use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::{Res, config::Config, error::ChartifyError, spotify, types::Token};

/// Seconds before expiry at which a token is already treated as expired.
const EXPIRY_MARGIN: u64 = 240;

pub struct TokenManager {
    token: Token,
    path: PathBuf,
}

impl TokenManager {
    pub fn new(token: Token, path: PathBuf) -> Self {
        TokenManager { token, path }
    }

    pub async fn load(path: &Path) -> Res<Self> {
        let content = async_fs::read_to_string(path).await?;
        let token: Token = serde_json::from_str(&content)?;
        Ok(Self {
            token,
            path: path.to_path_buf(),
        })
    }

    pub async fn persist(&self) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&self.token)?;
        async_fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Returns an access token, refreshing and re-caching it first when it
    /// is about to expire.
    ///
    /// # Errors
    ///
    /// Any failure of the refresh itself, network errors included, is
    /// reported as [`ChartifyError::Auth`].
    pub async fn get_valid_token(&mut self, config: &Config) -> Res<String> {
        if self.is_expired() {
            log::debug!("Access token expired, refreshing");
            self.token = spotify::auth::refresh_token(config, &self.token.refresh_token)
                .await
                .map_err(|e| match e {
                    ChartifyError::Auth(_) => e,
                    other => ChartifyError::Auth(format!("token refresh failed: {other}")),
                })?;
            self.persist().await?;
        }

        Ok(self.token.access_token.clone())
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp() as u64)
    }

    pub fn is_expired_at(&self, now: u64) -> bool {
        let expires_at = self.token.obtained_at + self.token.expires_in;
        now >= expires_at.saturating_sub(EXPIRY_MARGIN)
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }
}
