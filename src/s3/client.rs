//! AWS S3 client wrapper

use crate::config::CredentialRecord;
use crate::error::{Error, Result};
use crate::s3::store::{ObjectReader, ObjectStore};
use crate::s3::types::{ListingPage, ObjectEntry};
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::Client;

/// Name reported by the static credentials provider
const CREDENTIALS_PROVIDER_NAME: &str = "storacha-rclone";

/// Connection options that are not part of the stored credentials
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    /// Custom endpoint (MinIO, LocalStack, other S3-compatible services)
    pub endpoint_url: Option<String>,
    /// Use path-style addressing; implied by a custom endpoint
    pub force_path_style: bool,
}

impl SessionOptions {
    pub fn with_endpoint(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self.force_path_style = true;
        self
    }
}

/// Authenticated S3 client bound to one region and one bucket.
///
/// Credentials are static for the lifetime of the session: no refresh, no
/// retries beyond what the SDK itself does.
pub struct S3Session {
    client: Client,
    region: String,
    bucket: String,
}

impl S3Session {
    /// Build a session from a stored credential record
    pub async fn from_record(record: &CredentialRecord, options: &SessionOptions) -> Result<Self> {
        record.validate()?;
        validate_region(&record.region)?;

        let credentials = Credentials::new(
            &record.access_key_id,
            &record.secret_access_key,
            None,
            None,
            CREDENTIALS_PROVIDER_NAME,
        );

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(record.region.clone()))
            .credentials_provider(credentials);

        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(options.force_path_style)
            .build();

        tracing::debug!(
            "Created S3 session: region={}, bucket={}, endpoint={:?}",
            record.region,
            record.bucket,
            options.endpoint_url
        );

        Ok(Self {
            client: Client::from_conf(s3_config),
            region: record.region.clone(),
            bucket: record.bucket.clone(),
        })
    }

    /// Bucket this session was configured for
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Get the current region
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The underlying SDK client
    pub fn client(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl ObjectStore for S3Session {
    async fn list_page(
        &self,
        bucket: &str,
        prefix: Option<&str>,
        continuation_token: Option<&str>,
    ) -> Result<ListingPage> {
        let mut request = self.client.list_objects_v2().bucket(bucket);

        if let Some(p) = prefix {
            request = request.prefix(p);
        }

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(|e| Error::RemoteList {
            bucket: bucket.to_string(),
            message: DisplayErrorContext(&e).to_string(),
        })?;

        let entries = response
            .contents()
            .iter()
            .map(|obj| {
                ObjectEntry::new(
                    obj.key().unwrap_or_default(),
                    obj.size().unwrap_or(0).max(0) as u64,
                )
            })
            .collect();

        Ok(ListingPage {
            entries,
            next_token: response.next_continuation_token().map(|s| s.to_string()),
            truncated: response.is_truncated().unwrap_or(false),
        })
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<ObjectReader> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| Error::RemoteFetch {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        Ok(Box::pin(response.body.into_async_read()))
    }
}

/// Accept region names shaped like `us-east-1`: lowercase ASCII letters, digits and `-`
fn validate_region(region: &str) -> Result<()> {
    let well_formed = !region.is_empty()
        && !region.starts_with('-')
        && !region.ends_with('-')
        && region
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');

    if well_formed {
        Ok(())
    } else {
        Err(Error::AuthConfig(format!("malformed region `{region}`")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_region(region: &str) -> CredentialRecord {
        CredentialRecord::new("AKIAEXAMPLE", "secret-value", region, "my-bucket")
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_region("us-east-1").is_ok());
        assert!(validate_region("eu-central-2").is_ok());
        assert!(validate_region("auto").is_ok());

        assert!(validate_region("").is_err());
        assert!(validate_region("US-EAST-1").is_err());
        assert!(validate_region("us east 1").is_err());
        assert!(validate_region("us-east-1/").is_err());
        assert!(validate_region("-us").is_err());
    }

    #[tokio::test]
    async fn test_from_record_rejects_malformed_region() {
        let result = S3Session::from_record(
            &record_with_region("not a region"),
            &SessionOptions::default(),
        )
        .await;

        match result {
            Err(Error::AuthConfig(msg)) => {
                assert!(msg.contains("not a region"));
                assert!(!msg.contains("secret-value"));
            }
            Err(other) => panic!("expected AuthConfig, got {other:?}"),
            Ok(_) => panic!("expected AuthConfig, got a session"),
        }
    }

    #[tokio::test]
    async fn test_from_record_binds_region_and_bucket() {
        let session = S3Session::from_record(
            &record_with_region("eu-west-1"),
            &SessionOptions::default().with_endpoint("http://127.0.0.1:9000"),
        )
        .await
        .unwrap();

        assert_eq!(session.region(), "eu-west-1");
        assert_eq!(session.bucket(), "my-bucket");
        assert_eq!(
            session.client().config().region().map(|r| r.to_string()),
            Some("eu-west-1".to_string())
        );
    }

    #[test]
    fn test_session_options_endpoint_implies_path_style() {
        let options = SessionOptions::default().with_endpoint("http://localhost:9000");
        assert_eq!(options.endpoint_url.as_deref(), Some("http://localhost:9000"));
        assert!(options.force_path_style);
    }
}
