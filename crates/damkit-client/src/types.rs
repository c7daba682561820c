//! Wire types for the Damkit API
//!
//! These mirror the server's response envelope; the server stays
//! authoritative and unknown fields are ignored on decode.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Standard response envelope: `{ data, pagination? }`
#[derive(Clone, Debug, Deserialize)]
pub struct ApiResult<T> {
    /// Payload
    pub data: T,
    /// Present on list endpoints
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Pagination block attached to list responses
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

/// A managed file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    /// Stored name
    pub name: String,
    /// Name at upload time, if the server kept it
    #[serde(default)]
    pub original_name: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    /// Size in bytes
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub folder_id: Option<String>,
    /// Caller-supplied metadata, echoed back verbatim
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A folder
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FolderRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub file_count: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Aggregate counts for the dashboard view
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_files: u64,
    #[serde(default)]
    pub total_folders: u64,
    #[serde(default)]
    pub total_size: u64,
    #[serde(default)]
    pub recent_uploads: u64,
}

/// Storage usage breakdown
#[derive(Clone, Debug, Default, Deserialize)]
pub struct StorageStats {
    #[serde(default)]
    pub used_bytes: u64,
    #[serde(default)]
    pub quota_bytes: Option<u64>,
    #[serde(default)]
    pub file_count: u64,
}

/// Options for listing files
///
/// Each present field maps to exactly one query parameter, appended in
/// declaration order.
#[derive(Clone, Debug, Default)]
pub struct ListFilesOptions {
    /// Restrict to a folder
    pub folder_id: Option<String>,
    /// Restrict to a MIME type (exact or `image/` style prefix, server-defined)
    pub mime_type: Option<String>,
    /// Free-text search
    pub search: Option<String>,
    /// Maximum records to return
    pub limit: Option<u32>,
    /// Records to skip
    pub offset: Option<u32>,
}

impl ListFilesOptions {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(folder_id) = &self.folder_id {
            query.push(("folder_id", folder_id.clone()));
        }
        if let Some(mime_type) = &self.mime_type {
            query.push(("mime_type", mime_type.clone()));
        }
        if let Some(search) = &self.search {
            query.push(("search", search.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            query.push(("offset", offset.to_string()));
        }
        query
    }
}

/// Options for listing folders
#[derive(Clone, Debug, Default)]
pub struct ListFoldersOptions {
    /// Restrict to children of this folder; absent lists the root level
    pub parent_id: Option<String>,
}

/// Options for creating a folder, merged into the JSON body after `name`
#[derive(Clone, Debug, Default, Serialize)]
pub struct CreateFolderOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Mutable file fields for `update_file`
#[derive(Clone, Debug, Default, Serialize)]
pub struct FileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Mutable folder fields for `update_folder`
#[derive(Clone, Debug, Default, Serialize)]
pub struct FolderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Options attached to uploads
#[derive(Clone, Debug, Default)]
pub struct UploadOptions {
    /// Destination folder; absent uploads to the root
    pub folder_id: Option<String>,
    /// Arbitrary metadata, serialized to a JSON string multipart field
    pub metadata: Option<serde_json::Value>,
}

impl UploadOptions {
    /// Upload into a folder
    pub fn with_folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    /// Attach metadata
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A file body ready for upload
#[derive(Clone, Debug)]
pub struct FilePayload {
    /// Name reported to the server in the multipart part
    pub file_name: String,
    /// Content type of the part; absent lets the server sniff
    pub content_type: Option<String>,
    /// File bytes
    pub data: Bytes,
}

impl FilePayload {
    /// Create a payload from in-memory bytes
    pub fn new(file_name: impl Into<String>, data: impl Into<Bytes>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_guess::from_path(&file_name)
            .first()
            .map(|m| m.essence_str().to_string());
        Self {
            file_name,
            content_type,
            data: data.into(),
        }
    }

    /// Read a payload from disk, guessing the content type from the extension
    pub async fn from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let data = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "file".to_string());
        Ok(Self::new(file_name, data))
    }

    /// Override the content type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Size of the payload in bytes
    pub fn len(&self) -> u64 {
        self.data.len() as u64
    }

    /// Whether the payload is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
