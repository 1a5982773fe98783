//! Command output against an in-memory bucket
//!
//! Exercises the list and get handlers end to end without a network: the
//! bucket is a `BTreeMap` served in pages of a fixed size.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use storacha_rclone::commands::{download, print_listing};
use storacha_rclone::s3::{ListingPage, ObjectEntry, ObjectReader, ObjectStore};
use storacha_rclone::{Error, Result};
use tempfile::TempDir;

/// Sorted in-memory bucket; continuation tokens are the last key of the previous page
struct MemoryBucket {
    name: String,
    objects: BTreeMap<String, Vec<u8>>,
    page_size: usize,
    requests: AtomicUsize,
}

impl MemoryBucket {
    fn new(name: &str, page_size: usize, objects: &[(&str, usize)]) -> Self {
        Self {
            name: name.to_string(),
            objects: objects
                .iter()
                .map(|(key, size)| (key.to_string(), vec![b'.'; *size]))
                .collect(),
            page_size,
            requests: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStore for MemoryBucket {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
    ) -> Result<ListingPage> {
        self.requests.fetch_add(1, Ordering::SeqCst);

        if bucket != self.name {
            return Err(Error::RemoteList {
                bucket: bucket.to_string(),
                message: "NoSuchBucket".into(),
            });
        }

        let mut matching = self
            .objects
            .iter()
            .filter(|(key, _)| prefix.map_or(true, |p| key.starts_with(p)))
            .filter(|(key, _)| continuation_token.map_or(true, |t| key.as_str() > t));

        let entries: Vec<ObjectEntry> = matching
            .by_ref()
            .take(self.page_size)
            .map(|(key, data)| ObjectEntry::new(key.clone(), data.len() as u64))
            .collect();

        if matching.next().is_some() {
            let token = entries.last().map(|e| e.key.clone());
            Ok(ListingPage::truncated(entries, token))
        } else {
            Ok(ListingPage::last(entries))
        }
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader> {
        match self.objects.get(key) {
            Some(data) if bucket == self.name => Ok(Box::pin(std::io::Cursor::new(data.clone()))),
            _ => Err(Error::RemoteFetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "NoSuchKey".into(),
            }),
        }
    }
}

#[tokio::test]
async fn test_list_output_lines() {
    let bucket = MemoryBucket::new("bucket", 1000, &[("x", 10), ("y/z", 20)]);
    let mut out = Vec::new();

    let count = print_listing(&bucket, "bucket", None, &mut out).await.unwrap();

    assert_eq!(count, 2);
    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines, vec!["          10  x", "          20  y/z"]);
}

#[tokio::test]
async fn test_list_output_across_pages_with_prefix() {
    let objects: Vec<(String, usize)> = (0..7)
        .map(|i| (format!("logs/{i:02}.log"), i * 100))
        .chain([("other/file".to_string(), 5)])
        .collect();
    let objects: Vec<(&str, usize)> = objects.iter().map(|(k, s)| (k.as_str(), *s)).collect();
    let bucket = MemoryBucket::new("bucket", 3, &objects);

    let mut out = Vec::new();
    let count = print_listing(&bucket, "bucket", Some("logs/"), &mut out)
        .await
        .unwrap();

    assert_eq!(count, 7);
    // 7 entries in pages of 3: [0,1,2] [3,4,5] [6]
    assert_eq!(bucket.requests.load(Ordering::SeqCst), 3);

    let output = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.first(), Some(&"           0  logs/00.log"));
    assert_eq!(lines.last(), Some(&"         600  logs/06.log"));
    assert!(!output.contains("other/file"));
}

#[tokio::test]
async fn test_list_failure_is_remote_list_error() {
    let bucket = MemoryBucket::new("bucket", 10, &[("x", 1)]);
    let mut out = Vec::new();

    let err = print_listing(&bucket, "missing", None, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RemoteList { .. }), "got {err:?}");
    assert_eq!(err.exit_code(), 1);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_download_output_line() {
    let bucket = MemoryBucket::new("bucket", 10, &[("folder/report.csv", 42)]);
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("report.csv");
    let mut out = Vec::new();

    let result = download(&bucket, "bucket", "folder/report.csv", &dest, &mut out)
        .await
        .unwrap();

    assert_eq!(result.bytes_written, 42);
    assert_eq!(std::fs::metadata(&dest).unwrap().len(), 42);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        format!("downloaded 42 bytes -> {}\n", dest.display())
    );
}

#[tokio::test]
async fn test_download_missing_object() {
    let bucket = MemoryBucket::new("bucket", 10, &[]);
    let temp = TempDir::new().unwrap();
    let dest = temp.path().join("absent.txt");
    let mut out = Vec::new();

    let err = download(&bucket, "bucket", "absent.txt", &dest, &mut out)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::RemoteFetch { .. }));
    assert!(!dest.exists());
    assert!(out.is_empty());
}
