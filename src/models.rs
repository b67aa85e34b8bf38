use axum::body::Bytes;
use serde::{Deserialize, Serialize};

/// A file part accepted by the upload gate, buffered in memory for the
/// lifetime of the request.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub field: String,
    pub original_name: String,
    pub content_type: String,
    pub size: u64,
    pub data: Bytes,
}

/// One image and one audio file, both already admitted by the upload policy.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub image: IncomingFile,
    pub audio: IncomingFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum RenderResult {
    Success {
        #[serde(rename = "videoUrl")]
        video_url: String,
    },
    Error {
        error: String,
    },
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub status: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_result_wire_format() {
        let ok = RenderResult::Success {
            video_url: "https://example.com/out.mp4".into(),
        };
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            json!({ "status": "success", "videoUrl": "https://example.com/out.mp4" })
        );

        let err = RenderResult::Error {
            error: "Image file is required".into(),
        };
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({ "status": "error", "error": "Image file is required" })
        );
    }

    #[test]
    fn test_render_result_parses_error_body() {
        let parsed: RenderResult =
            serde_json::from_str(r#"{"status":"error","error":"Audio file is required"}"#)
                .unwrap();
        assert_eq!(
            parsed,
            RenderResult::Error {
                error: "Audio file is required".into()
            }
        );
    }
}
