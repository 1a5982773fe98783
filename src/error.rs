//! Error types for storacha-rclone.
//!
//! Every variant is terminal for the command that produced it. The CLI maps
//! each one to an exit code via [`Error::exit_code`]; nothing below `main`
//! terminates the process.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type.
///
/// Messages never contain the secret access key.
#[derive(Error, Debug)]
pub enum Error {
    /// Home directory could not be resolved or the config directory could not be created
    #[error("environment error: {0}")]
    Environment(String),

    /// No readable config file
    #[error("no credentials found at {}: {reason} (run `storacha-rclone login` again)", .path.display())]
    ConfigMissing { path: PathBuf, reason: String },

    /// Config file parsed but one of the required fields is empty
    #[error("config incomplete: `{field}` is empty (run `storacha-rclone login` again)")]
    ConfigIncomplete { field: &'static str },

    /// Config file exists but is not a valid JSON document
    #[error("config at {} is malformed: {reason} (run `storacha-rclone login` again)", .path.display())]
    ConfigMalformed { path: PathBuf, reason: String },

    /// Writing or renaming the config file failed
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The client could not be configured from the stored credentials
    #[error("AWS config: {0}")]
    AuthConfig(String),

    /// A listing page request failed
    #[error("ListObjectsV2 on bucket `{bucket}` failed: {message}")]
    RemoteList { bucket: String, message: String },

    /// The object could not be opened remotely
    #[error("GetObject s3://{bucket}/{key} failed: {message}")]
    RemoteFetch {
        bucket: String,
        key: String,
        message: String,
    },

    /// The destination file could not be created
    #[error("create {}: {source}", .path.display())]
    LocalCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transfer was interrupted after the destination was created
    #[error("write {}: {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading an answer from the terminal or writing command output failed
    #[error("terminal I/O failed: {0}")]
    Terminal(#[source] std::io::Error),

    /// Invalid invocation
    #[error("usage: {0}")]
    Usage(String),
}

impl Error {
    /// Process exit code for this error: 2 for usage errors, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage(_) => 2,
            _ => 1,
        }
    }
}

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
