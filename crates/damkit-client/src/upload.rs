//! Progress-tracked upload support
//!
//! Wraps the same multipart construction as [`DamClient::upload_file`] around
//! a counted byte stream so callers can surface transfer progress. The
//! reported percentage sequence is monotonically non-decreasing and a final
//! 100 is always emitted after a successful transfer, before the call
//! resolves.

use crate::{
    client::{decode, RequestBody},
    types::{ApiResult, FilePayload, FileRecord, UploadOptions},
    DamClient, Result,
};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

/// Stream chunk size for counted uploads
const CHUNK_SIZE: usize = 64 * 1024;

/// Progress callback type
pub type ProgressCallback = Arc<dyn Fn(UploadProgress) + Send + Sync>;

/// Upload progress information
#[derive(Clone, Copy, Debug)]
pub struct UploadProgress {
    /// Bytes handed to the transport so far
    pub bytes_sent: u64,
    /// Total bytes to upload
    pub total_bytes: u64,
}

impl UploadProgress {
    /// Completion percentage, rounded to the nearest whole number
    pub fn percentage(&self) -> u8 {
        if self.total_bytes == 0 {
            return 100;
        }
        (self.bytes_sent as f64 / self.total_bytes as f64 * 100.0).round() as u8
    }
}

/// Upload a file, reporting progress as the body is streamed out
pub async fn upload_with_progress(
    client: &DamClient,
    payload: FilePayload,
    options: &UploadOptions,
    progress: ProgressCallback,
) -> Result<ApiResult<FileRecord>> {
    let total_bytes = payload.len();
    let file_name = payload.file_name.clone();
    let content_type = payload.content_type.clone();

    let body = counted_body(payload.data, total_bytes, Arc::clone(&progress));
    let mut part = Part::stream_with_length(body, total_bytes).file_name(file_name);
    if let Some(content_type) = &content_type {
        part = part.mime_str(content_type).map_err(|_| {
            crate::ClientError::Config(format!("invalid content type: {}", content_type))
        })?;
    }

    let mut form = Form::new().part("file", part);
    if let Some(folder_id) = &options.folder_id {
        form = form.text("folder_id", folder_id.clone());
    }
    if let Some(metadata) = &options.metadata {
        form = form.text("metadata", serde_json::to_string(metadata)?);
    }

    let response = client
        .request(
            reqwest::Method::POST,
            "/public/single",
            None,
            None,
            Some(RequestBody::Multipart(form)),
        )
        .await?;
    let result = decode(response).await?;

    // The transport consumed every chunk, but guarantee the terminal report
    // even for empty payloads or when the last chunk callback raced the
    // response.
    progress(UploadProgress {
        bytes_sent: total_bytes,
        total_bytes,
    });

    Ok(result)
}

/// Split the payload into chunks and report cumulative bytes as each chunk
/// is pulled by the transport.
fn counted_body(data: Bytes, total_bytes: u64, progress: ProgressCallback) -> reqwest::Body {
    let mut chunks = Vec::with_capacity(data.len() / CHUNK_SIZE + 1);
    let mut offset = 0;
    while offset < data.len() {
        let end = usize::min(offset + CHUNK_SIZE, data.len());
        chunks.push(data.slice(offset..end));
        offset = end;
    }

    let sent = AtomicU64::new(0);
    let stream = futures::stream::iter(chunks.into_iter().map(move |chunk| {
        let bytes_sent = sent.fetch_add(chunk.len() as u64, Ordering::SeqCst) + chunk.len() as u64;
        progress(UploadProgress {
            bytes_sent,
            total_bytes,
        });
        Ok::<Bytes, std::io::Error>(chunk)
    }));

    reqwest::Body::wrap_stream(stream)
}

impl DamClient {
    /// Upload a single file through the progress-tracked path
    pub async fn upload_file_with_progress(
        &self,
        payload: FilePayload,
        options: &UploadOptions,
        progress: ProgressCallback,
    ) -> Result<ApiResult<FileRecord>> {
        upload_with_progress(self, payload, options, progress).await
    }
}
