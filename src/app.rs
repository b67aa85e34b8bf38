use crate::render::MockRenderer;
use crate::upload::UploadPolicy;
use crate::{handlers, AppError, Config};
use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use std::any::Any;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;

/// Built once at startup and shared read-only by every request.
pub struct AppState {
    pub config: Config,
    pub policy: UploadPolicy,
    pub renderer: MockRenderer,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let policy =
            UploadPolicy::render_default(config.max_file_size_bytes(), config.verify_file_signatures);
        let renderer = MockRenderer::from_config(&config);
        Self {
            config,
            policy,
            renderer,
        }
    }
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(cors::Any)
        .allow_methods(cors::Any)
        .allow_headers(cors::Any)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };
    AppError::Internal(detail).into_response()
}

/// State for the data server; it carries nothing from the render side.
pub struct DataState {
    pub message: String,
}

/// Panic recovery, CORS and request tracing, shared by both servers.
fn with_common_layers<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

/// Router for the render server: liveness check and `/render`.
pub fn render_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_request_body_bytes();

    let router = Router::new()
        .route("/", get(handlers::health_check))
        .route("/render", post(handlers::render::render_video))
        .layer(DefaultBodyLimit::max(body_limit));

    with_common_layers(router).with_state(state)
}

/// Router for the standalone data server.
pub fn data_router(config: &Config) -> Router {
    let state = Arc::new(DataState {
        message: config.data_message.clone(),
    });

    let router = Router::new().route("/api/data", get(handlers::api_data));

    with_common_layers(router).with_state(state)
}
