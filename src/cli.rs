//! CLI argument definitions for storacha-rclone.

use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// List and download objects from an S3 bucket using locally stored credentials.
///
/// ## Examples
///
/// Save credentials:
///   storacha-rclone login
///
/// List everything under a prefix:
///   storacha-rclone list --prefix reports/2024/
///
/// Download one object:
///   storacha-rclone get --key reports/2024/q1.csv --out q1.csv
#[derive(Parser, Debug)]
#[command(name = "storacha-rclone")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Log level (RUST_LOG takes precedence when set)
    #[arg(long, value_enum, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Custom S3 endpoint URL (MinIO, LocalStack, ...)
    #[arg(long, env = "STORACHA_RCLONE_ENDPOINT", global = true)]
    pub endpoint_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Save access key, secret, region and bucket
    #[command(alias = "aws-login")]
    Login,

    /// List objects in the configured bucket
    #[command(alias = "s3-ls")]
    List {
        /// Only list keys starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Download one object
    #[command(alias = "s3-get")]
    Get {
        /// Object key to download
        #[arg(long, value_parser = NonEmptyStringValueParser::new())]
        key: String,

        /// Local output file (defaults to the last path segment of the key)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

/// Log level options.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `tracing_subscriber::EnvFilter`
    pub fn as_directive(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
