//! S3 client wrapper module
//!
//! This module provides the remote side of the tool:
//! - [`client::S3Session`] - Authenticated client bound to one region and bucket
//! - [`store::ObjectStore`] - The seam the lister and fetcher are written against
//! - [`lister::ObjectLister`] - Paginated listing cursor
//! - [`fetcher::fetch`] - Single-object download
//! - [`types`] - Listing and download data types

pub mod client;
pub mod fetcher;
pub mod lister;
pub mod store;
pub mod types;

// Re-export commonly used types
pub use client::{S3Session, SessionOptions};
pub use fetcher::{derive_destination, fetch};
pub use lister::ObjectLister;
pub use store::{ObjectReader, ObjectStore};
pub use types::{DownloadResult, ListingPage, ObjectEntry};
