// ── HTTP transport construction ──
//
// Shared reqwest client configuration for the directory service.

use std::time::Duration;

use reqwest::header::HeaderMap;

use crate::Error;

/// How to treat the service's TLS certificate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// Verify against the system roots.
    #[default]
    Verify,
    /// Accept any certificate. Only sane for lab deployments.
    DangerAcceptInvalid,
}

/// Transport-level knobs applied to every request.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
    pub tls: TlsMode,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            tls: TlsMode::Verify,
        }
    }
}

impl TransportConfig {
    /// Build a reqwest client with these settings and the given default headers.
    pub fn build_client_with_headers(&self, headers: HeaderMap) -> Result<reqwest::Client, Error> {
        let builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .danger_accept_invalid_certs(self.tls == TlsMode::DangerAcceptInvalid);

        Ok(builder.build()?)
    }
}
