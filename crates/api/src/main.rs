use std::sync::Arc;

use anyhow::Context;

use wellness_api::{ApiConfig, AppState, SeededDirectory, build_app};
use wellness_auth::TokenEngine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    wellness_observability::init();

    let config = ApiConfig::from_env().inspect_err(|e| {
        tracing::error!(error = %e, kind = %e.kind(), "invalid configuration");
    })?;
    let engine = TokenEngine::from_config(&config.token).inspect_err(|e| {
        tracing::error!(error = %e, kind = %e.kind(), "invalid token configuration");
    })?;

    let directory = match &config.users_file {
        Some(path) => SeededDirectory::load(path)
            .with_context(|| format!("loading users from {}", path.display()))?,
        None => {
            tracing::warn!("USERS_FILE not set; user directory is empty");
            SeededDirectory::empty()
        }
    };
    let directory = Arc::new(directory);

    let app = build_app(AppState::new(engine, directory.clone(), directory));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
