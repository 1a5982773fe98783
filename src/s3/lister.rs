//! Object listing with pagination support.
//!
//! [`ObjectLister`] is a pull-based cursor over a bucket listing. Each call
//! to [`ObjectLister::next`] hands out the next buffered entry and only
//! requests a new page once the buffer is empty, so at most one request is
//! ever in flight and nothing is prefetched.

use crate::error::Result;
use crate::s3::store::ObjectStore;
use crate::s3::types::ObjectEntry;
use std::collections::VecDeque;

/// Lazy, finite listing of every object under a bucket/prefix.
///
/// Entries come out in the order the service returned them. Overlapping
/// pages are not deduplicated. A fresh `ObjectLister` restarts the listing
/// from the beginning.
///
/// # Example
///
/// ```ignore
/// let mut lister = ObjectLister::new(&session, "my-bucket", Some("data/"));
/// while let Some(entry) = lister.next().await? {
///     println!("{}", entry.listing_line());
/// }
/// ```
pub struct ObjectLister<'a, S: ObjectStore + ?Sized> {
    store: &'a S,
    bucket: String,
    prefix: Option<String>,
    continuation_token: Option<String>,
    buffered: VecDeque<ObjectEntry>,
    pages_fetched: usize,
    finished: bool,
}

impl<'a, S: ObjectStore + ?Sized> ObjectLister<'a, S> {
    pub fn new(store: &'a S, bucket: impl Into<String>, prefix: Option<&str>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            prefix: prefix.map(|p| p.to_string()),
            continuation_token: None,
            buffered: VecDeque::new(),
            pages_fetched: 0,
            finished: false,
        }
    }

    /// Next entry, `Ok(None)` once the listing is exhausted.
    ///
    /// A failed page request is returned once as an error; the lister is
    /// finished afterwards and keeps returning `Ok(None)`.
    pub async fn next(&mut self) -> Result<Option<ObjectEntry>> {
        loop {
            if let Some(entry) = self.buffered.pop_front() {
                return Ok(Some(entry));
            }

            if self.finished {
                return Ok(None);
            }

            self.fetch_page().await?;
        }
    }

    /// Drain the remaining entries into a vector
    pub async fn collect(mut self) -> Result<Vec<ObjectEntry>> {
        let mut entries = Vec::new();
        while let Some(entry) = self.next().await? {
            entries.push(entry);
        }
        Ok(entries)
    }

    /// Number of page requests issued so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    async fn fetch_page(&mut self) -> Result<()> {
        tracing::debug!(
            "Listing page {} of bucket={}, prefix={:?}, token={:?}",
            self.pages_fetched + 1,
            self.bucket,
            self.prefix,
            self.continuation_token
        );

        let page = self
            .store
            .list_page(
                &self.bucket,
                self.prefix.as_deref(),
                self.continuation_token.as_deref(),
            )
            .await;
        self.pages_fetched += 1;

        let page = match page {
            Ok(page) => page,
            Err(e) => {
                self.finished = true;
                return Err(e);
            }
        };

        tracing::debug!(
            "Received {} entries (truncated={})",
            page.entries.len(),
            page.truncated
        );

        self.buffered.extend(page.entries);

        if page.truncated {
            // An absent token on a truncated page is passed through as-is
            self.continuation_token = page.next_token;
        } else {
            self.finished = true;
        }

        Ok(())
    }
}
