//! Standalone server for `/api/data`.
//!
//! Deployed on its own; it shares the `PORT` setting with the render server
//! and must not run on the same port.

use render_backend::{app, telemetry, Config};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    telemetry::init();

    let config = Config::from_env()?;
    let addr = config.bind_addr();
    let app = app::data_router(&config);

    tracing::info!("Data server running on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
