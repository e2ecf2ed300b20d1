// Hand-crafted async HTTP client for the Roster directory service.
//
// Base path: api/
// Auth: optional X-API-KEY header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::models::{AnalyticsReport, CreateUserBody, UserRecord};
use crate::transport::TransportConfig;

// ── Error response shape from the service ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "error")]
    error: Option<String>,
}

impl ErrorResponse {
    fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}

// ── Client ───────────────────────────────────────────────────────────

/// Async client for the directory service.
///
/// Communicates via JSON REST endpoints under `api/`. Cheap to clone.
#[derive(Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DirectoryClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build a client for the service at `base_url`.
    ///
    /// When an API key is given it is injected as a sensitive
    /// `X-API-KEY` default header on every request.
    pub fn new(
        base_url: &str,
        api_key: Option<&secrecy::SecretString>,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        if let Some(key) = api_key {
            let mut value = HeaderValue::from_str(key.expose_secret())
                .map_err(|_| Error::InvalidApiKey)?;
            value.set_sensitive(true);
            headers.insert("X-API-KEY", value);
        }

        let http = transport.build_client_with_headers(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Force a trailing slash so relative joins behave.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/"));
        Ok(url)
    }

    // ── URL builder ──────────────────────────────────────────────────

    /// Join a relative path (e.g. `"api/users"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Endpoints ────────────────────────────────────────────────────

    /// `GET api/users` — the full user listing.
    pub async fn list_users(&self) -> Result<Vec<UserRecord>, Error> {
        self.get("api/users").await
    }

    /// `POST api/users` — create a user, returning the stored record.
    pub async fn create_user(&self, body: &CreateUserBody) -> Result<UserRecord, Error> {
        self.post("api/users", body).await
    }

    /// `DELETE api/users/{id}` — remove a user.
    pub async fn delete_user(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("api/users/{id}")).await
    }

    /// `GET api/analytics` — the aggregate report.
    pub async fn fetch_analytics(&self) -> Result<AnalyticsReport, Error> {
        self.get("api/analytics").await
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self.http.post(url).json(body).send().await?;
        Self::handle_response(resp).await
    }

    async fn delete(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.http.delete(url).send().await?;
        Self::handle_empty(resp).await
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview = &body[..body.len().min(200)];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn handle_empty(resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error(status, resp).await)
        }
    }

    async fn parse_error(status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Error::InvalidApiKey;
        }

        let raw = resp.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(ErrorResponse::into_message)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });

        Error::Api {
            status: status.as_u16(),
            message,
        }
    }
}
