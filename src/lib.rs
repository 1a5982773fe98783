//! storacha-rclone library
//!
//! This crate provides the pieces behind the `storacha-rclone` binary:
//! credential persistence, an authenticated S3 session, a paginated object
//! lister and a single-object fetcher. The binary only parses arguments,
//! sets up logging and maps errors to exit codes.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod prompt;
pub mod s3;

pub use error::{Error, Result};
