pub mod render;

use crate::app::DataState;
use crate::models::DataResponse;
use axum::{extract::State, Json};
use std::sync::Arc;

pub async fn health_check() -> &'static str {
    "Backend is live!"
}

pub async fn api_data(State(state): State<Arc<DataState>>) -> Json<DataResponse> {
    Json(DataResponse {
        status: "success",
        message: state.message.clone(),
    })
}
