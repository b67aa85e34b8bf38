use render_backend::{app, telemetry, AppState, Config};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    telemetry::init();

    let config = Config::from_env()?;
    tracing::info!(
        max_file_size_mb = config.max_file_size_mb,
        render_delay_ms = config.render_delay_ms,
        verify_file_signatures = config.verify_file_signatures,
        "Loaded config"
    );

    let addr = config.bind_addr();
    let state = Arc::new(AppState::from_config(config));
    let app = app::render_router(state);

    tracing::info!("Server running on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
