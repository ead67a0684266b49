use std::sync::Arc;

use crate::{config::Config, error, spotify};

pub async fn auth(config: Arc<Config>) {
    if let Err(e) = spotify::auth::auth(config).await {
        error!("{}", e);
    }
}
