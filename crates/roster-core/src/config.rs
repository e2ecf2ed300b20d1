//! Runtime configuration for a directory-service connection.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

use roster_api::transport::TlsMode;
use roster_api::{DirectoryClient, TransportConfig};

use crate::error::ServiceError;

/// Everything needed to talk to one directory service deployment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Service base URL (e.g. `https://roster.example.com`).
    pub base_url: Url,

    /// Optional API key sent as `X-API-KEY`.
    pub api_key: Option<SecretString>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// TLS certificate handling.
    pub tls: TlsMode,

    /// Periodic background refresh of both views; `0` disables it.
    /// Mutations always force a refetch regardless of this setting.
    pub refresh_interval_secs: u64,
}

impl ServiceConfig {
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            api_key: None,
            timeout: Duration::from_secs(30),
            tls: TlsMode::Verify,
            refresh_interval_secs: 0,
        }
    }

    fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            tls: self.tls,
        }
    }

    /// Build the production API client for this configuration.
    pub fn client(&self) -> Result<DirectoryClient, ServiceError> {
        Ok(DirectoryClient::new(
            self.base_url.as_str(),
            self.api_key.as_ref(),
            &self.transport(),
        )?)
    }
}
