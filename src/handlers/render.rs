use crate::models::RenderResult;
use crate::{AppError, AppState, Result};
use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::sync::Arc;

pub async fn render_video(
    State(state): State<Arc<AppState>>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<RenderResult>> {
    tracing::info!("Received render request");

    let multipart = multipart.map_err(|rejection| AppError::Multipart(rejection.body_text()))?;
    let files = state.policy.collect(multipart).await?;
    let request = files.into_render_request()?;

    let result = state.renderer.render(&request).await?;
    Ok(Json(result))
}
