//! Mock render stage.
//!
//! No media is processed: a render waits a fixed delay and returns the
//! configured video URL.

use crate::models::{RenderRequest, RenderResult};
use crate::{Config, Result};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct MockRenderer {
    delay: Duration,
    video_url: String,
}

impl MockRenderer {
    pub fn new(delay: Duration, video_url: impl Into<String>) -> Self {
        Self {
            delay,
            video_url: video_url.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.render_delay(), config.video_url.clone())
    }

    pub async fn render(&self, request: &RenderRequest) -> Result<RenderResult> {
        let render_id = Uuid::new_v4();
        tracing::info!(
            render_id = %render_id,
            image = %request.image.original_name,
            image_bytes = request.image.size,
            audio = %request.audio.original_name,
            audio_bytes = request.audio.size,
            delay_ms = self.delay.as_millis() as u64,
            "Starting mock render"
        );

        tokio::time::sleep(self.delay).await;

        tracing::info!(render_id = %render_id, "Mock render complete");
        Ok(RenderResult::Success {
            video_url: self.video_url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IncomingFile;
    use axum::body::Bytes;
    use tokio::time::Instant;

    fn request() -> RenderRequest {
        let file = |field: &str, name: &str, content_type: &str| IncomingFile {
            field: field.to_string(),
            original_name: name.to_string(),
            content_type: content_type.to_string(),
            size: 4,
            data: Bytes::from_static(b"data"),
        };
        RenderRequest {
            image: file("image", "cat.png", "image/png"),
            audio: file("audio", "song.wav", "audio/wav"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_render_waits_for_delay() {
        let renderer = MockRenderer::new(Duration::from_millis(2500), "https://example.com/v.mp4");
        let started = Instant::now();

        let result = renderer.render(&request()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(2500));
        assert_eq!(
            result,
            RenderResult::Success {
                video_url: "https://example.com/v.mp4".into()
            }
        );
    }

    #[tokio::test]
    async fn test_render_is_repeatable() {
        let renderer = MockRenderer::from_config(&Config {
            render_delay_ms: 0,
            ..Config::default()
        });

        let first = renderer.render(&request()).await.unwrap();
        let second = renderer.render(&request()).await.unwrap();
        assert_eq!(first, second);
        assert!(matches!(first, RenderResult::Success { .. }));
    }
}
