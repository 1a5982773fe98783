//! S3 data types

use std::path::PathBuf;

/// One object from a bucket listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub key: String,
    pub size: u64,
}

impl ObjectEntry {
    pub fn new(key: impl Into<String>, size: u64) -> Self {
        Self {
            key: key.into(),
            size,
        }
    }

    /// Render as a listing line: size right-aligned to 12 columns, two spaces, key
    pub fn listing_line(&self) -> String {
        format!("{:>12}  {}", self.size, self.key)
    }
}

/// Result of a single `ListObjectsV2` request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Entries in the order the service returned them
    pub entries: Vec<ObjectEntry>,
    /// Continuation token for the next request; may be absent even when truncated
    pub next_token: Option<String>,
    /// Whether more pages follow
    pub truncated: bool,
}

impl ListingPage {
    /// A page that ends the listing
    pub fn last(entries: Vec<ObjectEntry>) -> Self {
        Self {
            entries,
            next_token: None,
            truncated: false,
        }
    }

    /// A page with more results behind `next_token`
    pub fn truncated(entries: Vec<ObjectEntry>, next_token: Option<String>) -> Self {
        Self {
            entries,
            next_token,
            truncated: true,
        }
    }
}

/// Outcome of a completed download
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadResult {
    pub bytes_written: u64,
    pub destination: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_line_alignment() {
        assert_eq!(ObjectEntry::new("x", 10).listing_line(), "          10  x");
        assert_eq!(ObjectEntry::new("y/z", 20).listing_line(), "          20  y/z");
    }

    #[test]
    fn test_listing_line_wide_size() {
        // Sizes wider than the column are not truncated
        let line = ObjectEntry::new("big.bin", 1_234_567_890_123).listing_line();
        assert_eq!(line, "1234567890123  big.bin");
    }

    #[test]
    fn test_listing_page_constructors() {
        let page = ListingPage::truncated(vec![ObjectEntry::new("a", 1)], None);
        assert!(page.truncated);
        assert!(page.next_token.is_none());

        let page = ListingPage::last(Vec::new());
        assert!(!page.truncated);
        assert!(page.entries.is_empty());
    }
}
