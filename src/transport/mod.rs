//! Mutual-TLS HTTP transport wrapper.
//!
//! [`MtlsTransport`] wraps a [`reqwest::Client`] built once with the
//! merchant's client certificate and the server verification policy from
//! [`TlsConfig`]. It exposes the three verbs the Swish API uses (PUT, GET,
//! PATCH), each against an explicit base URL, and returns the raw status,
//! headers, and body without interpreting them. Status interpretation
//! belongs to the client layer.
//!
//! The base URL is an argument on every call rather than transport state, so
//! the QR operation can target the QR generator directly instead of the
//! payment endpoints.

use reqwest::{Certificate, Client, Identity, Method};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{Result, SwishError, Violation};

pub mod config;

pub use config::{ServerVerification, TlsConfig, TransportConfig};

const JSON: &str = "application/json";
const JSON_PATCH: &str = "application/json-patch+json";

/// Raw response from a transport operation.
#[derive(Debug)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers, in arrival order.
    pub headers: Vec<(String, String)>,
    /// Raw response body bytes.
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Looks up a header value by name, case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// HTTP transport with a fixed mutual-TLS identity.
///
/// Cheap to share: all state lives in the pooled `reqwest::Client`. No
/// operation mutates the transport, so it is safe for concurrent use.
#[derive(Debug, Clone)]
pub struct MtlsTransport {
    client: Client,
}

impl MtlsTransport {
    /// Creates a transport with default HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Certificate`] if the TLS material does not
    /// parse, or [`SwishError::Http`] if the underlying client cannot be
    /// built.
    pub fn new(tls: &TlsConfig) -> Result<Self> {
        Self::with_config(tls, &TransportConfig::default())
    }

    /// Creates a transport with custom HTTP settings.
    ///
    /// # Errors
    ///
    /// Returns a validation error for out-of-bounds settings, and otherwise
    /// fails as [`new`](Self::new) does.
    pub fn with_config(tls: &TlsConfig, config: &TransportConfig) -> Result<Self> {
        config.validate()?;

        let identity = Identity::from_pem(&tls.identity_pem)
            .map_err(|e| SwishError::Certificate(format!("client identity: {e}")))?;

        let mut builder = Client::builder()
            .use_rustls_tls()
            .identity(identity)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout());

        match &tls.verify {
            ServerVerification::CaBundle(path) => {
                let pem = config::read_pem(path)?;
                let roots = Certificate::from_pem_bundle(&pem)
                    .map_err(|e| SwishError::Certificate(format!("{}: {e}", path.display())))?;
                builder = builder.tls_built_in_root_certs(false);
                for root in roots {
                    builder = builder.add_root_certificate(root);
                }
            }
            ServerVerification::Disabled => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        Ok(Self { client: builder.build()? })
    }

    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the request fails.
    pub async fn get(&self, base_url: &str, path: &str) -> Result<TransportResponse> {
        self.execute(Method::GET, base_url, path, None).await
    }

    /// Executes a PUT request with an `application/json` body.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the request fails.
    pub async fn put(
        &self,
        base_url: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse> {
        self.execute(Method::PUT, base_url, path, Some((JSON, body))).await
    }

    /// Executes a PATCH request with an `application/json-patch+json` body.
    ///
    /// # Errors
    ///
    /// Returns error if the URL is invalid or the request fails.
    pub async fn patch(
        &self,
        base_url: &str,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<TransportResponse> {
        self.execute(Method::PATCH, base_url, path, Some((JSON_PATCH, body))).await
    }

    #[instrument(skip(self, body))]
    async fn execute(
        &self,
        method: Method,
        base_url: &str,
        path: &str,
        body: Option<(&'static str, &serde_json::Value)>,
    ) -> Result<TransportResponse> {
        let full_url = join_url(base_url, path)?;

        let mut request = self.client.request(method, full_url);
        if let Some((content_type, value)) = body {
            let bytes = serde_json::to_vec(value)
                .map_err(|e| SwishError::Validation(vec![Violation::new("body", e.to_string())]))?;
            request = request.header("Content-Type", content_type).body(bytes);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_str().unwrap_or("").to_owned()))
            .collect();
        let response_body = response.bytes().await?.to_vec();

        debug!(status, bytes = response_body.len(), "response received");

        Ok(TransportResponse { status, headers, body: response_body })
    }
}

/// Joins a base URL and a path, validating the result.
///
/// The payment endpoints and the QR generator live on different hosts, so
/// the base URL is always explicit.
fn join_url(base_url: &str, path: &str) -> Result<String> {
    let full = format!("{}{path}", base_url.trim_end_matches('/'));
    let url = Url::parse(&full).map_err(|e| SwishError::InvalidUrl(format!("{full}: {e}")))?;
    if url.scheme() != "https" {
        return Err(SwishError::InvalidUrl(format!("refusing non-HTTPS URL: {full}")));
    }
    Ok(full)
}
