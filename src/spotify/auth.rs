use std::{sync::Arc, time::Duration};

use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    Res,
    config::{Config, SPOTIFY_SCOPE},
    error::ChartifyError,
    management::TokenManager,
    server::{AuthState, start_api_server},
    success,
    types::{PkceToken, Token, TokenResponse},
    utils, warning,
};

/// How long the flow waits for the user to finish the consent page.
const AUTH_TIMEOUT: Duration = Duration::from_secs(120);

/// Runs the OAuth 2.0 authorization code flow and caches the resulting token.
///
/// 1. **PKCE Setup**: Generates a code verifier, its SHA256 challenge and a
///    random `state` value
/// 2. **Server Start**: Launches the local callback server
/// 3. **Browser Launch**: Opens the Spotify consent page (always shown)
/// 4. **Callback Handling**: The callback exchanges the code for a token
/// 5. **Token Persistence**: The token is written to the configured cache
///
/// # Errors
///
/// Returns [`ChartifyError::Auth`] when no token arrives within two minutes,
/// or an IO/JSON error when the token cannot be cached.
pub async fn auth(config: Arc<Config>) -> Res<Token> {
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);
    let state = utils::generate_state();

    let auth_url = authorize_url(&config, &code_challenge, &state)?;

    // Store verifier in shared state before redirect
    let shared_state = Arc::new(Mutex::new(Some(PkceToken {
        code_verifier,
        state,
        token: None,
    })));

    let server_state = AuthState {
        pkce: Arc::clone(&shared_state),
        config: Arc::clone(&config),
    };
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(server_state).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    if webbrowser::open(auth_url.as_str()).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    let token = token.ok_or_else(|| {
        ChartifyError::Auth("authorization failed or timed out".to_string())
    })?;

    TokenManager::new(token.clone(), config.token_cache.clone())
        .persist()
        .await?;
    success!("Authentication successful!");
    Ok(token)
}

/// Builds the consent page URL.
pub fn authorize_url(config: &Config, code_challenge: &str, state: &str) -> Res<Url> {
    Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", SPOTIFY_SCOPE),
            ("state", state),
            ("code_challenge_method", "S256"),
            ("code_challenge", code_challenge),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| ChartifyError::Config(format!("invalid SPOTIFY_API_AUTH_URL: {e}")))
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.clone()) {
            return Some(token);
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges the authorization code from the callback for a token.
pub async fn exchange_code(config: &Config, code: &str, verifier: &str) -> Res<Token> {
    let response = token_request(
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("client_id", config.client_id.as_str()),
            ("code_verifier", verifier),
        ],
    )
    .await?;

    Ok(response.into_token(None))
}

/// Trades a refresh token for a new access token.
pub async fn refresh_token(config: &Config, refresh_token: &str) -> Res<Token> {
    let response = token_request(
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await?;

    Ok(response.into_token(Some(refresh_token)))
}

async fn token_request(config: &Config, form: &[(&str, &str)]) -> Res<TokenResponse> {
    let response = Client::new()
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ChartifyError::Auth(format!(
            "token endpoint returned {status}: {body}"
        )));
    }

    Ok(response.json::<TokenResponse>().await?)
}
