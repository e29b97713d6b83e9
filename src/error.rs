//! Error types for the Swish client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Configuration** ([`SwishError::UnknownEnvironment`],
//!   [`SwishError::Certificate`]): construction-time failures, before any
//!   request is made
//! - **Validation** ([`SwishError::Validation`]): a model failed local
//!   constraint checks; nothing was sent over the wire
//! - **Provider business errors** ([`SwishError::Api`]): Swish rejected the
//!   request with HTTP 422 and a structured error list
//! - **Transport errors** ([`SwishError::UnexpectedStatus`],
//!   [`SwishError::Http`]): any other non-success status, or a
//!   connection/TLS/DNS failure propagated from reqwest
//!
//! The client never retries: every error is surfaced synchronously to the
//! caller of the triggering operation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for Swish client operations.
pub type Result<T> = std::result::Result<T, SwishError>;

/// A single violated constraint found while validating a model.
///
/// [`SwishError::Validation`] carries one entry per violated constraint, so a
/// request with several invalid fields reports all of them at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Wire name of the offending field (e.g. `callbackUrl`).
    pub field: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl Violation {
    /// Creates a new violation for `field`.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field: field.into(), message: message.into() }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// One entry of the structured error list Swish returns with HTTP 422.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorEntry {
    /// Provider error code (e.g. `AM06`, `RP03`).
    #[serde(rename = "errorCode")]
    pub error_code: String,
    /// Human-readable message accompanying the code.
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    /// Extra context the provider attaches to some error codes.
    #[serde(rename = "additionalInformation", default, skip_serializing_if = "Option::is_none")]
    pub additional_information: Option<String>,
}

impl std::fmt::Display for ApiErrorEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.error_message {
            Some(message) => write!(f, "{}: {}", self.error_code, message),
            None => write!(f, "{}", self.error_code),
        }
    }
}

fn format_list<T: std::fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// Errors that can occur in the Swish client.
///
/// Callers are expected to branch on [`Api`](Self::Api) for provider-reported
/// business errors (declined payments, invalid aliases, ...) and treat the
/// remaining variants as configuration or transport failures.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum SwishError {
    /// An environment name passed at construction time was not recognized.
    #[error("unknown Swish environment: {0}")]
    UnknownEnvironment(String),

    /// A model failed local constraint checks before being sent.
    ///
    /// Carries every violated constraint, not just the first. Nothing was
    /// sent over the wire.
    #[error("request validation failed: {}", format_list(.0))]
    Validation(Vec<Violation>),

    /// Swish rejected the request with HTTP 422.
    ///
    /// Carries the decoded provider error list, one entry per reported
    /// problem. This is a business-level rejection, not a transport failure.
    #[error("Swish rejected the request: {}", format_list(.0))]
    Api(Vec<ApiErrorEntry>),

    /// Swish returned a non-success status other than 422.
    ///
    /// The raw response body is included for diagnostics.
    #[error("Swish returned HTTP {status}: {body}")]
    UnexpectedStatus {
        /// HTTP status code of the response.
        status: u16,
        /// Raw response body, lossily decoded as UTF-8.
        body: String,
    },

    /// The HTTP request itself failed.
    ///
    /// Wraps [`reqwest::Error`]: connection refused, DNS failure, TLS
    /// handshake failure, timeout. Propagated unmodified.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Client certificate or CA bundle material could not be read or parsed.
    #[error("TLS material could not be loaded: {0}")]
    Certificate(String),

    /// A computed request URL was malformed or not HTTPS.
    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_environment_display() {
        let error = SwishError::UnknownEnvironment("staging".to_owned());
        assert_eq!(error.to_string(), "unknown Swish environment: staging");
    }

    #[test]
    fn test_validation_display_lists_every_violation() {
        let error = SwishError::Validation(vec![
            Violation::new("currency", "must be a 3-letter uppercase code"),
            Violation::new("amount", "must be positive"),
        ]);
        let text = error.to_string();
        assert!(text.contains("currency: must be a 3-letter uppercase code"));
        assert!(text.contains("amount: must be positive"));
    }

    #[test]
    fn test_api_error_display_with_message() {
        let entry = ApiErrorEntry {
            error_code: "AM06".to_owned(),
            error_message: Some("Specified transaction amount is less than agreed minimum".to_owned()),
            additional_information: None,
        };
        assert_eq!(
            entry.to_string(),
            "AM06: Specified transaction amount is less than agreed minimum"
        );
    }

    #[test]
    fn test_api_error_display_without_message() {
        let entry = ApiErrorEntry {
            error_code: "RP03".to_owned(),
            error_message: None,
            additional_information: None,
        };
        assert_eq!(entry.to_string(), "RP03");
    }

    #[test]
    fn test_api_error_entry_decodes_wire_names() {
        let entry: ApiErrorEntry = serde_json::from_str(
            r#"{"errorCode":"BE18","errorMessage":"Payer alias is invalid"}"#,
        )
        .unwrap();
        assert_eq!(entry.error_code, "BE18");
        assert_eq!(entry.error_message.as_deref(), Some("Payer alias is invalid"));
        assert!(entry.additional_information.is_none());
    }

    #[test]
    fn test_api_error_list_round_trip() {
        let body = r#"[{"errorCode":"FF08","errorMessage":"PaymentReference is invalid"},{"errorCode":"AM03"}]"#;
        let entries: Vec<ApiErrorEntry> = serde_json::from_str(body).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].error_code, "FF08");
        assert_eq!(entries[1].error_code, "AM03");
        assert!(entries[1].error_message.is_none());

        let error = SwishError::Api(entries);
        let text = error.to_string();
        assert!(text.contains("FF08: PaymentReference is invalid"));
        assert!(text.contains("AM03"));
    }

    #[test]
    fn test_unexpected_status_display() {
        let error =
            SwishError::UnexpectedStatus { status: 500, body: "Internal Server Error".to_owned() };
        assert_eq!(error.to_string(), "Swish returned HTTP 500: Internal Server Error");
    }

    #[test]
    fn test_certificate_display() {
        let error = SwishError::Certificate("no such file: client.pem".to_owned());
        assert!(error.to_string().contains("no such file: client.pem"));
    }
}
