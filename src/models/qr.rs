//! Commerce QR-code generation request model.

use serde::{Deserialize, Serialize};

use super::{from_wire_value, to_wire_value};
use crate::error::{Result, Violation};

/// Image format for a generated commerce QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrFormat {
    /// JPEG image.
    Jpg,
    /// PNG image.
    Png,
    /// SVG vector image.
    Svg,
}

/// Request for rendering a payment-request token as a scannable QR image.
///
/// The token comes from a payment created without a payer alias (the
/// `request_token` on [`Payment`](super::Payment)).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommerceQrCodeRequest {
    /// Payment request token to encode.
    pub token: String,
    /// Output image format.
    pub format: QrFormat,
    /// Edge length of the generated image in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
    /// Width of the quiet border around the code, in modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border: Option<u32>,
    /// Render with a transparent background (PNG and SVG only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transparent: Option<bool>,
}

impl CommerceQrCodeRequest {
    /// Creates a request for `token` in the given format, with provider
    /// defaults for size, border, and background.
    pub fn new(token: impl Into<String>, format: QrFormat) -> Self {
        Self { token: token.into(), format, size: None, border: None, transparent: None }
    }

    /// Produces the wire JSON mapping for this request.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Validation`](crate::SwishError::Validation)
    /// listing every violated constraint.
    pub fn to_wire(&self) -> Result<serde_json::Value> {
        to_wire_value(self, self.validate())
    }

    /// Decodes a request from a wire JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Validation`](crate::SwishError::Validation) if
    /// the value does not decode.
    pub fn from_wire(value: serde_json::Value) -> Result<Self> {
        from_wire_value(value)
    }

    /// Checks the local constraints of every populated field.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.token.is_empty() {
            violations.push(Violation::new("token", "must not be empty"));
        }
        if self.size == Some(0) {
            violations.push(Violation::new("size", "must be positive"));
        }
        violations
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::SwishError;

    #[test]
    fn test_format_serializes_lowercase() {
        assert_eq!(serde_json::to_value(QrFormat::Jpg).unwrap(), json!("jpg"));
        assert_eq!(serde_json::to_value(QrFormat::Png).unwrap(), json!("png"));
        assert_eq!(serde_json::to_value(QrFormat::Svg).unwrap(), json!("svg"));
    }

    #[test]
    fn test_minimal_request_omits_unset_fields() {
        let request = CommerceQrCodeRequest::new("f34DS34lfd0d03fdDselkfd3ffk21", QrFormat::Png);
        let wire = request.to_wire().unwrap();
        assert_eq!(wire, json!({ "token": "f34DS34lfd0d03fdDselkfd3ffk21", "format": "png" }));
    }

    #[test]
    fn test_full_request_round_trip() {
        let request = CommerceQrCodeRequest {
            token: "f34DS34lfd0d03fdDselkfd3ffk21".to_owned(),
            format: QrFormat::Svg,
            size: Some(300),
            border: Some(2),
            transparent: Some(true),
        };
        let wire = request.to_wire().unwrap();
        assert_eq!(wire["size"], json!(300));
        assert_eq!(wire["border"], json!(2));
        assert_eq!(wire["transparent"], json!(true));

        let decoded = CommerceQrCodeRequest::from_wire(wire).unwrap();
        assert_eq!(decoded, request);
    }

    #[test]
    fn test_empty_token_rejected() {
        let request = CommerceQrCodeRequest::new("", QrFormat::Png);
        let error = request.to_wire().unwrap_err();
        assert!(matches!(error, SwishError::Validation(v) if v[0].field == "token"));
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut request = CommerceQrCodeRequest::new("token", QrFormat::Png);
        request.size = Some(0);
        assert_eq!(request.validate().len(), 1);
    }

    #[test]
    fn test_unknown_format_rejected() {
        let result = CommerceQrCodeRequest::from_wire(json!({ "token": "t", "format": "bmp" }));
        assert!(matches!(result, Err(SwishError::Validation(_))));
    }
}
