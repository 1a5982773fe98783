//! Credential record persistence
//!
//! The record lives in a single JSON file under the user's home directory:
//! `~/.storacha-rclone/config.json` (directory mode 0700, file mode 0600).
//! Saving goes through a temporary sibling file and a rename, so readers see
//! either the previous document or the new one, never a partial write.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Directory under `$HOME` holding the config file
pub const CONFIG_DIR_NAME: &str = ".storacha-rclone";

/// Config file name inside [`CONFIG_DIR_NAME`]
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Static credentials plus the default region and bucket.
///
/// Field names on disk are camelCase and must stay that way for
/// compatibility with existing config files.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    #[serde(default)]
    pub region: String,

    #[serde(default)]
    pub bucket: String,
}

impl CredentialRecord {
    pub fn new(
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
        region: impl Into<String>,
        bucket: impl Into<String>,
    ) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            region: region.into(),
            bucket: bucket.into(),
        }
    }

    /// Check that all four fields are populated.
    ///
    /// Returns the first empty field as [`Error::ConfigIncomplete`].
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("accessKeyId", &self.access_key_id),
            ("secretAccessKey", &self.secret_access_key),
            ("region", &self.region),
            ("bucket", &self.bucket),
        ];

        match fields.iter().find(|(_, value)| value.is_empty()) {
            Some((field, _)) => Err(Error::ConfigIncomplete { field: *field }),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .finish()
    }
}

/// Loads and saves the [`CredentialRecord`].
///
/// Command handlers receive a `&ConfigStore` instead of reaching for a
/// global path, so tests can point one at a temporary directory.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    /// Store rooted at `~/.storacha-rclone`
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            Error::Environment("could not determine the user's home directory".to_string())
        })?;

        Ok(Self::in_dir(home.join(CONFIG_DIR_NAME)))
    }

    /// Store rooted at an arbitrary directory
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the config file without touching the filesystem
    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE_NAME)
    }

    /// Get the config file path, creating its directory (mode 0700) if needed
    pub fn resolve_path(&self) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            Error::Environment(format!(
                "failed to create config directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        restrict_dir(&self.dir).map_err(|e| {
            Error::Environment(format!(
                "failed to set permissions on {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        Ok(self.config_path())
    }

    /// Write the record, replacing whatever was stored before
    pub fn save(&self, record: &CredentialRecord) -> Result<PathBuf> {
        let path = self.resolve_path()?;
        let tmp = temp_path(&path);

        let contents = serde_json::to_string_pretty(record)
            .map_err(|e| io_error(&tmp, io::Error::new(io::ErrorKind::InvalidData, e)))?;

        write_private(&tmp, contents.as_bytes()).map_err(|e| io_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| io_error(&path, e))?;

        tracing::info!("Saved credentials to {:?}", path);

        Ok(path)
    }

    /// Read the record, rejecting anything that is not fully populated
    pub fn load(&self) -> Result<CredentialRecord> {
        let path = self.resolve_path()?;

        let contents = fs::read_to_string(&path).map_err(|e| Error::ConfigMissing {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let record: CredentialRecord =
            serde_json::from_str(&contents).map_err(|e| Error::ConfigMalformed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        record.validate()?;

        tracing::debug!(
            "Loaded credentials from {:?}: region={}, bucket={}",
            path,
            record.region,
            record.bucket
        );

        Ok(record)
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Create or truncate `path` with mode 0600 and write `contents` to it.
///
/// Permissions are set before the first byte is written, including when a
/// stale file with looser permissions is left over from an earlier run.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }

    let mut file = options.open(path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }

    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(unix)]
fn restrict_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(0o700))
}

#[cfg(not(unix))]
fn restrict_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}
