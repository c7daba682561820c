//! Main client implementation

use crate::{
    types::*, ClientError, Config, Result, TransformOptions,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    multipart::{Form, Part},
    Client, Method, Response,
};
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// Authentication header carrying the key identifier (headers are
/// case-insensitive on the wire; kept lowercase for `HeaderName::from_static`)
pub const HEADER_KEY_ID: &str = "x-api-key-id";
/// Authentication header carrying the key secret
pub const HEADER_KEY_SECRET: &str = "x-api-key-secret";

/// Request body variants accepted by the generic request path
pub(crate) enum RequestBody {
    /// JSON-serialized payload, sent as `application/json`
    Json(serde_json::Value),
    /// Multipart form; reqwest sets the boundary, no content type is forced
    Multipart(Form),
}

/// Damkit API client
///
/// Holds immutable credentials and a shared connection pool; construct one
/// per configuration and pass it (or a clone) to every consumer.
#[derive(Clone)]
pub struct DamClient {
    config: Config,
    api_root: String,
    http: Client,
}

impl DamClient {
    /// Create a new client with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| ClientError::Config("invalid user agent".to_string()))?,
        );

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(ClientError::Network)?;

        let api_root = config.api_root();
        Ok(Self {
            config,
            api_root,
            http,
        })
    }

    /// Create a client straight from the three required credentials
    pub fn connect(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Result<Self> {
        Self::new(Config::new(base_url, key_id, key_secret)?)
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================== File Operations ====================

    /// Upload a single file
    #[instrument(skip(self, payload))]
    pub async fn upload_file(
        &self,
        payload: FilePayload,
        options: &UploadOptions,
    ) -> Result<ApiResult<FileRecord>> {
        let form = build_upload_form(vec![payload], "file", options)?;
        let response = self
            .request(
                Method::POST,
                "/public/single",
                None,
                None,
                Some(RequestBody::Multipart(form)),
            )
            .await?;
        decode(response).await
    }

    /// Upload several files in one request
    #[instrument(skip(self, payloads))]
    pub async fn upload_files(
        &self,
        payloads: Vec<FilePayload>,
        options: &UploadOptions,
    ) -> Result<ApiResult<Vec<FileRecord>>> {
        let form = build_upload_form(payloads, "files", options)?;
        let response = self
            .request(
                Method::POST,
                "/public/multiple",
                None,
                None,
                Some(RequestBody::Multipart(form)),
            )
            .await?;
        decode(response).await
    }

    /// List files matching the given filters
    #[instrument(skip(self))]
    pub async fn get_files(&self, options: &ListFilesOptions) -> Result<ApiResult<Vec<FileRecord>>> {
        let query = options.to_query();
        let response = self
            .request(Method::GET, "/public/files", Some(&query), None, None)
            .await?;
        decode(response).await
    }

    /// Fetch a single file record
    #[instrument(skip(self))]
    pub async fn get_file(&self, id: &str) -> Result<ApiResult<FileRecord>> {
        let path = format!("/public/files/{}", id);
        let response = self.request(Method::GET, &path, None, None, None).await?;
        decode(response).await
    }

    /// Delete a file
    #[instrument(skip(self))]
    pub async fn delete_file(&self, id: &str) -> Result<()> {
        let path = format!("/public/files/{}", id);
        self.request(Method::DELETE, &path, None, None, None).await?;
        Ok(())
    }

    /// Delete several files in one request
    #[instrument(skip(self))]
    pub async fn delete_files(&self, ids: &[String]) -> Result<()> {
        let body = serde_json::json!({ "ids": ids });
        self.request(
            Method::POST,
            "/files/bulk-delete",
            None,
            None,
            Some(RequestBody::Json(body)),
        )
        .await?;
        Ok(())
    }

    /// Update mutable file fields
    #[instrument(skip(self, updates))]
    pub async fn update_file(&self, id: &str, updates: &FileUpdate) -> Result<ApiResult<FileRecord>> {
        let path = format!("/files/{}", id);
        let body = serde_json::to_value(updates)?;
        let response = self
            .request(Method::PUT, &path, None, None, Some(RequestBody::Json(body)))
            .await?;
        decode(response).await
    }

    /// Move a file to another folder; `None` moves it to the root
    #[instrument(skip(self))]
    pub async fn move_file(
        &self,
        id: &str,
        folder_id: Option<&str>,
    ) -> Result<ApiResult<FileRecord>> {
        let path = format!("/files/{}/move", id);
        let body = serde_json::json!({ "folder_id": folder_id });
        let response = self
            .request(Method::PUT, &path, None, None, Some(RequestBody::Json(body)))
            .await?;
        decode(response).await
    }

    // ==================== Folder Operations ====================

    /// List folders, optionally under a parent
    #[instrument(skip(self))]
    pub async fn list_folders(
        &self,
        options: &ListFoldersOptions,
    ) -> Result<ApiResult<Vec<FolderRecord>>> {
        let mut query = Vec::new();
        if let Some(parent_id) = &options.parent_id {
            query.push(("parent_id", parent_id.clone()));
        }
        let response = self
            .request(Method::GET, "/folders", Some(&query), None, None)
            .await?;
        decode(response).await
    }

    /// Create a folder
    #[instrument(skip(self))]
    pub async fn create_folder(
        &self,
        name: &str,
        options: &CreateFolderOptions,
    ) -> Result<ApiResult<FolderRecord>> {
        let mut body = serde_json::to_value(options)?;
        if let Some(map) = body.as_object_mut() {
            map.insert(
                "name".to_string(),
                serde_json::Value::String(name.to_string()),
            );
        }
        let response = self
            .request(
                Method::POST,
                "/folders",
                None,
                None,
                Some(RequestBody::Json(body)),
            )
            .await?;
        decode(response).await
    }

    /// Update mutable folder fields
    #[instrument(skip(self, updates))]
    pub async fn update_folder(
        &self,
        id: &str,
        updates: &FolderUpdate,
    ) -> Result<ApiResult<FolderRecord>> {
        let path = format!("/folders/{}", id);
        let body = serde_json::to_value(updates)?;
        let response = self
            .request(Method::PUT, &path, None, None, Some(RequestBody::Json(body)))
            .await?;
        decode(response).await
    }

    /// Delete a folder
    #[instrument(skip(self))]
    pub async fn delete_folder(&self, id: &str) -> Result<()> {
        let path = format!("/folders/{}", id);
        self.request(Method::DELETE, &path, None, None, None).await?;
        Ok(())
    }

    // ==================== Statistics ====================

    /// Fetch aggregate dashboard counters
    #[instrument(skip(self))]
    pub async fn dashboard_stats(&self) -> Result<ApiResult<DashboardStats>> {
        let response = self
            .request(Method::GET, "/stats/dashboard", None, None, None)
            .await?;
        decode(response).await
    }

    /// Fetch storage usage
    #[instrument(skip(self))]
    pub async fn storage_stats(&self) -> Result<ApiResult<StorageStats>> {
        let response = self
            .request(Method::GET, "/stats/storage", None, None, None)
            .await?;
        decode(response).await
    }

    /// Probe reachability and credentials with a minimal list request
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<()> {
        let query = [("limit", "1".to_string())];
        self.request(Method::GET, "/public/files", Some(&query), None, None)
            .await?;
        Ok(())
    }

    // ==================== URL Builder ====================

    /// Build a link to a file, optionally with server-side transforms.
    ///
    /// Pure: never touches the network. Returns `None` when `file_id` is
    /// absent so templates can chain straight off an optional record field.
    pub fn file_url(
        &self,
        file_id: Option<&str>,
        options: Option<&TransformOptions>,
    ) -> Option<String> {
        let file_id = file_id?;
        let url = format!("{}/transform/{}", self.api_root, file_id);
        match options.and_then(TransformOptions::to_query) {
            Some(query) => Some(format!("{}?{}", url, query)),
            None => Some(url),
        }
    }

    // ==================== Helper Methods ====================

    pub(crate) async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        headers: Option<HashMap<String, String>>,
        body: Option<RequestBody>,
    ) -> Result<Response> {
        let url = format!("{}{}", self.api_root, path);
        let mut req = self.http.request(method.clone(), &url);

        if let Some(q) = query {
            req = req.query(q);
        }

        // Defaults first, caller overrides after so the caller wins.
        let mut header_map = HeaderMap::new();
        header_map.insert(
            HeaderName::from_static(HEADER_KEY_ID),
            header_value(&self.config.key_id)?,
        );
        header_map.insert(
            HeaderName::from_static(HEADER_KEY_SECRET),
            header_value(&self.config.key_secret)?,
        );

        let req = match body {
            Some(RequestBody::Json(value)) => {
                header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
                apply_headers(&mut header_map, headers)?;
                req.headers(header_map).body(serde_json::to_vec(&value)?)
            }
            Some(RequestBody::Multipart(form)) => {
                // No forced content type; the transport sets the boundary.
                apply_headers(&mut header_map, headers)?;
                req.headers(header_map).multipart(form)
            }
            None => {
                apply_headers(&mut header_map, headers)?;
                req.headers(header_map)
            }
        };

        debug!("Sending {} request to {}", method, url);
        let response = req.send().await.map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::from_response(status, &body));
        }

        Ok(response)
    }
}

/// Parse a 2xx response body as JSON; invalid JSON is a hard failure
pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let text = response.text().await.map_err(ClientError::Network)?;
    Ok(serde_json::from_str(&text)?)
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| ClientError::Config("credential is not a valid header value".to_string()))
}

fn apply_headers(map: &mut HeaderMap, overrides: Option<HashMap<String, String>>) -> Result<()> {
    if let Some(overrides) = overrides {
        for (name, value) in overrides {
            let name = name
                .parse::<HeaderName>()
                .map_err(|_| ClientError::Config(format!("invalid header name: {}", name)))?;
            map.insert(name, header_value(&value)?);
        }
    }
    Ok(())
}

pub(crate) fn build_upload_form(
    payloads: Vec<FilePayload>,
    field: &'static str,
    options: &UploadOptions,
) -> Result<Form> {
    let mut form = Form::new();

    for payload in payloads {
        let mut part = Part::bytes(payload.data.to_vec()).file_name(payload.file_name);
        if let Some(content_type) = &payload.content_type {
            part = part.mime_str(content_type).map_err(|_| {
                ClientError::Config(format!("invalid content type: {}", content_type))
            })?;
        }
        form = form.part(field, part);
    }

    if let Some(folder_id) = &options.folder_id {
        form = form.text("folder_id", folder_id.clone());
    }
    if let Some(metadata) = &options.metadata {
        form = form.text("metadata", serde_json::to_string(metadata)?);
    }

    Ok(form)
}
