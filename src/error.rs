use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::RenderResult;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unexpected field: {field}")]
    InvalidField { field: String },

    #[error("Invalid file type for {field}: {content_type}")]
    InvalidContentType { field: String, content_type: String },

    #[error("Too many files for {field}: max {max} allowed")]
    TooManyFiles { field: String, max: usize },

    #[error("File too large for {field}: max {} allowed", format_size(.max_bytes))]
    PayloadTooLarge { field: String, max_bytes: u64 },

    #[error("{} file is required", capitalize(.0))]
    MissingField(String),

    #[error("Failed to read form data: {0}")]
    Multipart(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

fn capitalize(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const MIB: u64 = 1024 * 1024;

/// Whole mebibytes as `NMB`, anything else in bytes.
fn format_size(bytes: &u64) -> String {
    if *bytes >= MIB && *bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    /// Field the error refers to, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            AppError::InvalidField { field }
            | AppError::InvalidContentType { field, .. }
            | AppError::TooManyFiles { field, .. }
            | AppError::PayloadTooLarge { field, .. }
            | AppError::MissingField(field) => Some(field.as_str()),
            AppError::Multipart(_) | AppError::Internal(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                "Failed to render video".to_string()
            }
            other => {
                tracing::warn!(field = ?other.field(), "Rejected upload: {}", other);
                other.to_string()
            }
        };

        (self.status(), Json(RenderResult::Error { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_messages() {
        assert_eq!(
            AppError::MissingField("image".into()).to_string(),
            "Image file is required"
        );
        assert_eq!(
            AppError::MissingField("audio".into()).to_string(),
            "Audio file is required"
        );
    }

    #[test]
    fn test_status_codes() {
        let invalid = AppError::InvalidContentType {
            field: "image".into(),
            content_type: "image/gif".into(),
        };
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        assert_eq!(invalid.field(), Some("image"));
        assert_eq!(invalid.to_string(), "Invalid file type for image: image/gif");

        let too_large = AppError::PayloadTooLarge {
            field: "audio".into(),
            max_bytes: 50 * MIB,
        };
        assert_eq!(too_large.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            too_large.to_string(),
            "File too large for audio: max 50MB allowed"
        );

        let internal = AppError::Internal("boom".into());
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(internal.field(), None);
    }

    #[test]
    fn test_size_below_one_mib_reported_in_bytes() {
        let err = AppError::PayloadTooLarge {
            field: "image".into(),
            max_bytes: 1024,
        };
        assert_eq!(err.to_string(), "File too large for image: max 1024 bytes allowed");
        assert_eq!(format_size(&(MIB + 1)), "1048577 bytes");
    }
}
