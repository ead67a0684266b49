use std::collections::HashMap;

use axum::{Extension, extract::Query, response::Html};

use crate::{server::AuthState, spotify, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(state): Extension<AuthState>,
) -> Html<&'static str> {
    if let Some(error) = params.get("error") {
        warning!("Spotify authorization was denied: {}", error);
        return Html("<h4>Authorization denied.</h4>");
    }

    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut lock = state.pkce.lock().await;
    let Some(pkce) = lock.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    if params.get("state") != Some(&pkce.state) {
        warning!("Ignoring callback with mismatching state parameter.");
        return Html("<h4>Invalid state parameter.</h4>");
    }

    match spotify::auth::exchange_code(&state.config, code, &pkce.code_verifier).await {
        Ok(token) => {
            pkce.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
