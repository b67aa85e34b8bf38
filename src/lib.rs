pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod render;
pub mod signature;
pub mod telemetry;
pub mod upload;

pub use app::AppState;
pub use config::Config;
pub use error::{AppError, Result};
