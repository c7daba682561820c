//! # Damkit Client SDK
//!
//! A client SDK for the Damkit digital asset management API.
//!
//! ## Features
//!
//! - **API-key authentication**: every request carries the `X-API-Key-ID`
//!   and `X-API-Key-Secret` headers
//! - **Uploads**: single and multi-file multipart uploads, with an optional
//!   progress-tracked streaming path
//! - **Transform URLs**: a pure builder for server-side image transform
//!   links (resize, format, quality, blur, grayscale, rotate)
//! - **Passthrough envelope**: responses are decoded into the server's
//!   `{ data, pagination? }` shape without reinterpretation
//!
//! ## Example
//!
//! ```rust,ignore
//! use damkit_client::{DamClient, FilePayload, ListFilesOptions, UploadOptions};
//!
//! #[tokio::main]
//! async fn main() -> damkit_client::Result<()> {
//!     let client = DamClient::connect(
//!         "https://dam.example.com",
//!         std::env::var("DAMKIT_KEY_ID").unwrap(),
//!         std::env::var("DAMKIT_KEY_SECRET").unwrap(),
//!     )?;
//!
//!     // Upload a file
//!     let payload = FilePayload::from_path("./logo.png").await?;
//!     let uploaded = client.upload_file(payload, &UploadOptions::default()).await?;
//!
//!     // Build a resized link to it
//!     let url = client.file_url(Some(&uploaded.data.id), None);
//!     println!("uploaded: {:?}", url);
//!
//!     // List what's there
//!     let files = client.get_files(&ListFilesOptions::default()).await?;
//!     println!("{} files", files.data.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod transform;
mod types;
mod upload;

pub use client::{DamClient, HEADER_KEY_ID, HEADER_KEY_SECRET};
pub use config::Config;
pub use error::{ClientError, Result};
pub use transform::{ImageFit, ImageFormat, TransformOptions};
pub use types::*;
pub use upload::{upload_with_progress, ProgressCallback, UploadProgress};
