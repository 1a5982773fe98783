//! The remote storage seam
//!
//! [`ObjectStore`] is the only way the lister and fetcher talk to the
//! service. [`crate::s3::S3Session`] implements it over `aws-sdk-s3`; tests
//! implement it in memory.

use crate::error::Result;
use crate::s3::types::ListingPage;
use async_trait::async_trait;
use std::pin::Pin;
use tokio::io::AsyncRead;

/// Body of a remote object. Dropping it closes the underlying connection.
pub type ObjectReader = Pin<Box<dyn AsyncRead + Send>>;

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch one page of a listing.
    ///
    /// `continuation_token` is passed through exactly as the previous page
    /// returned it. Failures are reported as [`crate::Error::RemoteList`].
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
    ) -> Result<ListingPage>;

    /// Open an object for reading.
    ///
    /// Failures are reported as [`crate::Error::RemoteFetch`].
    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader>;
}
