use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use server_api::{ApiContext, SessionConfig};
use storage::Storage;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod config;

use api::build_router;
use app_state::AppState;
use config::{load_settings, Settings, DEFAULT_SESSION_SECRET};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings()?;
    let state = build_state(&settings).map_err(|error| {
        error!(
            seed_path = ?settings.seed_path,
            %error,
            "failed to open beneficiary directory; verify the seed file exists and is valid JSON"
        );
        error
    })?;
    if state.api.storage.is_empty().await {
        warn!(seed_path = ?settings.seed_path, "beneficiary directory is empty");
    }
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .server_bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", settings.server_bind))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_state(settings: &Settings) -> anyhow::Result<AppState> {
    if settings.session_secret == DEFAULT_SESSION_SECRET {
        warn!("using the built-in session secret; set APP__SESSION_SECRET outside development");
    }
    let storage = Storage::open(settings.seed_path.as_deref())?;
    let api = ApiContext::new(
        storage,
        SessionConfig {
            secret: settings.session_secret.clone(),
            ttl_seconds: settings.session_ttl_seconds,
        },
    );
    Ok(AppState {
        api,
        max_body_bytes: settings.max_body_bytes,
    })
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
