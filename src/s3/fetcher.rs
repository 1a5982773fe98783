//! Single-object download to local disk.

use crate::error::{Error, Result};
use crate::s3::store::{ObjectReader, ObjectStore};
use crate::s3::types::DownloadResult;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Default local file name for `key`: everything after the last `/`.
///
/// Keys that end in `/` have no file name and are rejected.
pub fn derive_destination(key: &str) -> Result<PathBuf> {
    let name = key.rsplit('/').next().unwrap_or(key);

    if name.is_empty() {
        return Err(Error::Usage(format!(
            "cannot derive a file name from key `{key}`; pass --out"
        )));
    }

    Ok(PathBuf::from(name))
}

/// Download `bucket/key` to `destination` (or a name derived from the key).
///
/// The remote object is opened before the local file is created, so a
/// missing object never leaves an empty file behind. A transfer that fails
/// midway leaves the partial file in place.
pub async fn fetch<S: ObjectStore + ?Sized>(
    store: &S,
    bucket: &str,
    key: &str,
    destination: Option<&Path>,
) -> Result<DownloadResult> {
    if key.is_empty() {
        return Err(Error::Usage("object key must not be empty".to_string()));
    }

    let destination = match destination {
        Some(path) => path.to_path_buf(),
        None => derive_destination(key)?,
    };

    tracing::debug!("Fetching s3://{}/{} -> {:?}", bucket, key, destination);

    let mut body = store.get_object(bucket, key).await?;

    let mut file = File::create(&destination)
        .await
        .map_err(|e| Error::LocalCreate {
            path: destination.clone(),
            source: e,
        })?;

    // Flush even when the copy failed so the partial file is on disk
    let copied = copy_body(&mut body, &mut file).await;
    let flushed = file.flush().await;

    let bytes_written = match (copied, flushed) {
        (Ok(n), Ok(())) => n,
        (Err(e), _) | (Ok(_), Err(e)) => {
            return Err(Error::Copy {
                path: destination,
                source: e,
            })
        }
    };

    tracing::info!(
        "Downloaded {} bytes from s3://{}/{} to {:?}",
        bytes_written,
        bucket,
        key,
        destination
    );

    Ok(DownloadResult {
        bytes_written,
        destination,
    })
}

async fn copy_body(body: &mut ObjectReader, file: &mut File) -> io::Result<u64> {
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut written = 0u64;

    loop {
        let n = body.read(&mut buf).await?;
        if n == 0 {
            return Ok(written);
        }
        file.write_all(&buf[..n]).await?;
        written += n as u64;
    }
}
