use std::net::SocketAddr;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use docchat_backend::core::config::Settings;
use docchat_backend::logging;
use docchat_backend::server::router::router;
use docchat_backend::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init();

    let settings = Settings::from_env();
    let addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let state = AppState::initialize(settings)?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
