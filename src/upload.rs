//! Upload gate for multipart submissions.
//!
//! Every file part is checked against an [`UploadPolicy`] before its body is
//! read: the field must be declared, must not exceed its file count, and must
//! carry an accepted content type. Bodies are streamed chunk by chunk so an
//! oversized file is rejected as soon as it crosses the size ceiling.

use crate::models::{IncomingFile, RenderRequest};
use crate::{signature, AppError, Result};
use axum::{
    body::Bytes,
    extract::multipart::{Field, Multipart},
};
use mime_guess::mime::Mime;
use std::collections::HashMap;

/// Content type assumed for file parts that declare none.
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Debug, Clone)]
pub struct FieldRule {
    pub accepted_types: Vec<&'static str>,
    pub max_count: usize,
}

#[derive(Debug, Clone)]
pub struct UploadPolicy {
    fields: HashMap<&'static str, FieldRule>,
    max_file_size: u64,
    verify_signatures: bool,
}

impl UploadPolicy {
    pub fn new(max_file_size: u64) -> Self {
        Self {
            fields: HashMap::new(),
            max_file_size,
            verify_signatures: false,
        }
    }

    pub fn with_field(
        mut self,
        name: &'static str,
        accepted_types: &[&'static str],
        max_count: usize,
    ) -> Self {
        self.fields.insert(
            name,
            FieldRule {
                accepted_types: accepted_types.to_vec(),
                max_count,
            },
        );
        self
    }

    pub fn verify_signatures(mut self, enabled: bool) -> Self {
        self.verify_signatures = enabled;
        self
    }

    /// Policy for `/render`: one JPEG/PNG image and one MPEG/WAV audio file.
    pub fn render_default(max_file_size: u64, verify_signatures: bool) -> Self {
        Self::new(max_file_size)
            .with_field("image", &["image/jpeg", "image/png"], 1)
            .with_field("audio", &["audio/mpeg", "audio/wav", "audio/wave"], 1)
            .verify_signatures(verify_signatures)
    }

    /// Checks a file part's header against the policy.
    ///
    /// `already_received` is the number of files accepted so far for `field`.
    pub fn admit(&self, field: &str, content_type: &str, already_received: usize) -> Result<()> {
        let rule = self.fields.get(field).ok_or_else(|| AppError::InvalidField {
            field: field.to_string(),
        })?;

        if already_received >= rule.max_count {
            return Err(AppError::TooManyFiles {
                field: field.to_string(),
                max: rule.max_count,
            });
        }

        let essence = essence_of(content_type);
        if !rule.accepted_types.iter().any(|t| *t == essence) {
            return Err(AppError::InvalidContentType {
                field: field.to_string(),
                content_type: content_type.to_string(),
            });
        }

        Ok(())
    }

    /// Buffers a file part, failing as soon as it crosses the size ceiling.
    pub async fn read_file(&self, mut field: Field<'_>) -> Result<IncomingFile> {
        let name = field.name().unwrap_or_default().to_string();
        let original_name = field.file_name().unwrap_or_default().to_string();
        let content_type = essence_of(field.content_type().unwrap_or(DEFAULT_CONTENT_TYPE));

        let mut buf: Vec<u8> = Vec::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| AppError::Multipart(e.body_text()))?
        {
            if (buf.len() + chunk.len()) as u64 > self.max_file_size {
                tracing::warn!(
                    field = %name,
                    filename = %original_name,
                    received = buf.len() + chunk.len(),
                    max_file_size = self.max_file_size,
                    "File size limit exceeded, aborting upload"
                );
                return Err(AppError::PayloadTooLarge {
                    field: name,
                    max_bytes: self.max_file_size,
                });
            }
            buf.extend_from_slice(&chunk);
        }

        if self.verify_signatures && !signature::matches_content_type(&content_type, &buf) {
            return Err(AppError::InvalidContentType {
                field: name,
                content_type,
            });
        }

        Ok(IncomingFile {
            field: name,
            original_name,
            content_type,
            size: buf.len() as u64,
            data: Bytes::from(buf),
        })
    }

    /// Runs every part of `multipart` through the gate.
    ///
    /// Parts without a filename are plain form fields; they are drained and
    /// ignored.
    pub async fn collect(&self, mut multipart: Multipart) -> Result<UploadedFiles> {
        let mut files = UploadedFiles::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Multipart(e.body_text()))?
        {
            let name = field.name().unwrap_or_default().to_string();

            if field.file_name().is_none() {
                tracing::debug!("Ignoring non-file field: {}", name);
                field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Multipart(e.body_text()))?;
                continue;
            }

            let content_type = field
                .content_type()
                .unwrap_or(DEFAULT_CONTENT_TYPE)
                .to_string();
            self.admit(&name, &content_type, files.count(&name))?;

            let file = self.read_file(field).await?;
            tracing::info!(
                "Received {}: {} ({} bytes)",
                file.field,
                file.original_name,
                file.size
            );
            files.push(file);
        }

        Ok(files)
    }
}

/// Lowercased `type/subtype` with parameters stripped.
fn essence_of(content_type: &str) -> String {
    match content_type.parse::<Mime>() {
        Ok(mime) => mime.essence_str().to_ascii_lowercase(),
        Err(_) => content_type.trim().to_ascii_lowercase(),
    }
}

/// Files accepted by the gate, grouped by field name.
#[derive(Debug, Default)]
pub struct UploadedFiles {
    by_field: HashMap<String, Vec<IncomingFile>>,
}

impl UploadedFiles {
    pub fn push(&mut self, file: IncomingFile) {
        self.by_field.entry(file.field.clone()).or_default().push(file);
    }

    pub fn count(&self, field: &str) -> usize {
        self.by_field.get(field).map_or(0, Vec::len)
    }

    fn take_first(&mut self, field: &str) -> Option<IncomingFile> {
        self.by_field
            .get_mut(field)
            .filter(|files| !files.is_empty())
            .map(|files| files.remove(0))
    }

    /// Pairs the image and audio uploads. A missing image is reported
    /// before a missing audio file.
    pub fn into_render_request(mut self) -> Result<RenderRequest> {
        let image = self
            .take_first("image")
            .ok_or_else(|| AppError::MissingField("image".to_string()))?;
        let audio = self
            .take_first("audio")
            .ok_or_else(|| AppError::MissingField("audio".to_string()))?;

        Ok(RenderRequest { image, audio })
    }
}
