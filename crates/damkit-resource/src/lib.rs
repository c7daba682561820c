//! # Damkit Resource Bindings
//!
//! Thin reactive glue over [`damkit_client`]: a [`Resource`] holds the
//! `(data, loading, error)` state of one client operation and re-invokes it
//! on demand, publishing every transition through a watch channel. This is
//! the store-pattern rendition of "render + refetch" wiring; the client's
//! contract drives everything and no independent logic lives here.
//!
//! ## Example
//!
//! ```rust,ignore
//! use damkit_client::{DamClient, ListFilesOptions};
//! use damkit_resource::{mutate, Resource};
//! use std::sync::Arc;
//!
//! # async fn demo(client: Arc<DamClient>) {
//! let files = {
//!     let client = Arc::clone(&client);
//!     Resource::new(move || {
//!         let client = Arc::clone(&client);
//!         async move { client.get_files(&ListFilesOptions::default()).await }
//!     })
//! };
//!
//! files.load().await;
//! let mut updates = files.subscribe();
//!
//! // Delete a file, then refresh the listing.
//! let _ = mutate(&files, client.delete_file("f1")).await;
//! # }
//! ```

mod resource;

pub use resource::{mutate, Resource, ResourceState};
