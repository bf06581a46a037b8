// ============================
// crates/backend-bin/src/main.rs
// ============================
//! MentoreTalk API server entry point.
use std::sync::Arc;

use mentoretalk_backend_lib::{
    config::Settings, router::create_router, store::FlatFileStore, AppState,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Try the working directory first, then the checked-in default.
    let settings = Settings::load().or_else(|_| Settings::load_from("config/default.toml"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(settings.log_level.clone())),
        )
        .init();

    if settings.jwt_secret == Settings::default().jwt_secret {
        tracing::warn!("running with the development signing secret; set MENTORETALK_JWT_SECRET");
    }

    let store = FlatFileStore::new(&settings.data_dir)?;
    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState::new(store, settings));

    let app = create_router(state);

    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
