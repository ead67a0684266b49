use std::{net::SocketAddr, str::FromStr, sync::Arc};

use axum::{Extension, Router, routing::get};
use tokio::sync::Mutex;

use crate::{Res, api, config::Config, error::ChartifyError, types::PkceToken};

/// State handed to the callback handler.
#[derive(Clone)]
pub struct AuthState {
    pub pkce: Arc<Mutex<Option<PkceToken>>>,
    pub config: Arc<Config>,
}

pub fn router(state: AuthState) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)))
}

pub async fn start_api_server(state: AuthState) -> Res<()> {
    let addr = SocketAddr::from_str(&state.config.server_addr).map_err(|e| {
        ChartifyError::Config(format!(
            "invalid SERVER_ADDRESS '{}': {e}",
            state.config.server_addr
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::debug!("Callback server listening on {addr}");
    axum::serve(listener, router(state)).await?;
    Ok(())
}
