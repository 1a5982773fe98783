//! Command handlers behind the CLI subcommands
//!
//! Each handler takes the [`ConfigStore`] and its output sink by reference
//! and returns an error instead of exiting; `main` decides the exit code.

use crate::config::{ConfigStore, CredentialRecord};
use crate::error::{Error, Result};
use crate::prompt::Prompter;
use crate::s3::{self, DownloadResult, ObjectLister, ObjectStore, S3Session, SessionOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Ask for credentials and overwrite the stored record.
///
/// Empty answers are rejected before anything is written, so an existing
/// working record is never replaced by an unusable one.
pub fn login<P, W>(config: &ConfigStore, prompter: &mut P, out: &mut W) -> Result<PathBuf>
where
    P: Prompter + ?Sized,
    W: Write + ?Sized,
{
    writeln!(out, "== storacha-rclone login ==").map_err(Error::Terminal)?;
    out.flush().map_err(Error::Terminal)?;

    let access_key_id = prompter
        .prompt("AWS Access Key ID: ")
        .map_err(Error::Terminal)?;
    let secret_access_key = prompter
        .prompt_secret("AWS Secret Access Key: ")
        .map_err(Error::Terminal)?;
    let region = prompter
        .prompt("Default AWS Region (e.g., us-east-1): ")
        .map_err(Error::Terminal)?;
    let bucket = prompter
        .prompt("Default S3 bucket name: ")
        .map_err(Error::Terminal)?;

    let record = CredentialRecord::new(access_key_id, secret_access_key, region, bucket);
    record.validate()?;

    let path = config.save(&record)?;

    writeln!(out, "Saved. (stored in {} with 0600 perms)", path.display())
        .map_err(Error::Terminal)?;

    Ok(path)
}

/// List every object under `prefix` in the configured bucket.
///
/// Returns the number of objects printed.
pub async fn list<W>(
    config: &ConfigStore,
    options: &SessionOptions,
    prefix: Option<&str>,
    out: &mut W,
) -> Result<usize>
where
    W: Write + ?Sized,
{
    let record = config.load()?;
    let session = S3Session::from_record(&record, options).await?;

    print_listing(&session, session.bucket(), prefix, out).await
}

/// Print one `{size:>12}  {key}` line per object as pages arrive.
pub async fn print_listing<S, W>(
    store: &S,
    bucket: &str,
    prefix: Option<&str>,
    out: &mut W,
) -> Result<usize>
where
    S: ObjectStore + ?Sized,
    W: Write + ?Sized,
{
    let mut lister = ObjectLister::new(store, bucket, prefix);
    let mut count = 0;

    while let Some(entry) = lister.next().await? {
        writeln!(out, "{}", entry.listing_line()).map_err(Error::Terminal)?;
        count += 1;
    }
    out.flush().map_err(Error::Terminal)?;

    tracing::debug!(
        "Listed {} objects in {} pages",
        count,
        lister.pages_fetched()
    );

    Ok(count)
}

/// Download one object from the configured bucket.
///
/// The key and destination are checked before the config is loaded, so
/// usage mistakes are reported even without stored credentials.
pub async fn get<W>(
    config: &ConfigStore,
    options: &SessionOptions,
    key: &str,
    destination: Option<&Path>,
    out: &mut W,
) -> Result<DownloadResult>
where
    W: Write + ?Sized,
{
    if key.is_empty() {
        return Err(Error::Usage("--key is required".to_string()));
    }

    let destination = match destination {
        Some(path) => path.to_path_buf(),
        None => s3::derive_destination(key)?,
    };

    let record = config.load()?;
    let session = S3Session::from_record(&record, options).await?;

    download(&session, session.bucket(), key, &destination, out).await
}

/// Fetch `key` to `destination` and print the confirmation line.
pub async fn download<S, W>(
    store: &S,
    bucket: &str,
    key: &str,
    destination: &Path,
    out: &mut W,
) -> Result<DownloadResult>
where
    S: ObjectStore + ?Sized,
    W: Write + ?Sized,
{
    let result = s3::fetch(store, bucket, key, Some(destination)).await?;

    writeln!(
        out,
        "downloaded {} bytes -> {}",
        result.bytes_written,
        result.destination.display()
    )
    .map_err(Error::Terminal)?;

    Ok(result)
}
