//! Typed request/response models for the Swish API.
//!
//! Every model maps between the domain vocabulary (snake_case fields) and the
//! wire vocabulary (the provider's camelCase JSON names) through an explicit
//! serde rename table. That table is the contract with the remote API and
//! must not drift.
//!
//! Models are plain immutable values. Each exposes:
//!
//! - `to_wire()`: the wire JSON mapping, with unset fields omitted entirely
//!   (absent, not `null`; the provider treats the two differently for
//!   partial updates). Validates first and reports every violated constraint
//!   at once.
//! - `from_wire(value)`: a model decoded from a response mapping, tolerant of
//!   missing optional fields.

use rust_decimal::Decimal;
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::{Result, SwishError, Violation};

mod payment;
mod qr;
mod refund;

pub use payment::{Operation, OperationKind, Payment};
pub use qr::{CommerceQrCodeRequest, QrFormat};
pub use refund::Refund;

/// Serializes a validated model to its wire JSON value.
pub(crate) fn to_wire_value<T: Serialize>(model: &T, violations: Vec<Violation>) -> Result<serde_json::Value> {
    if !violations.is_empty() {
        return Err(SwishError::Validation(violations));
    }
    serde_json::to_value(model)
        .map_err(|e| SwishError::Validation(vec![Violation::new("body", e.to_string())]))
}

/// Decodes a model from a wire JSON value.
pub(crate) fn from_wire_value<T: DeserializeOwned>(value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| SwishError::Validation(vec![Violation::new("body", e.to_string())]))
}

/// Amount must be positive with at most two decimal places.
pub(crate) fn check_amount(violations: &mut Vec<Violation>, field: &str, amount: Decimal) {
    if amount <= Decimal::ZERO {
        violations.push(Violation::new(field, "must be positive"));
    }
    if amount.round_dp(2) != amount {
        violations.push(Violation::new(field, "must have at most two decimal places"));
    }
}

/// Currency must be a 3-letter uppercase ISO 4217 code.
pub(crate) fn check_currency(violations: &mut Vec<Violation>, field: &str, value: &str) {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_uppercase()) {
        violations.push(Violation::new(field, "must be a 3-letter uppercase currency code"));
    }
}

/// Callback URLs must be well-formed and use HTTPS.
pub(crate) fn check_callback_url(violations: &mut Vec<Violation>, field: &str, value: &str) {
    match Url::parse(value) {
        Ok(url) if url.scheme() == "https" => {}
        Ok(_) => violations.push(Violation::new(field, "must use the https scheme")),
        Err(e) => violations.push(Violation::new(field, format!("is not a well-formed URL: {e}"))),
    }
}

/// Instruction identifiers are UUIDs rendered as 32 uppercase hex digits,
/// without hyphens.
pub(crate) fn check_instruction_id(violations: &mut Vec<Violation>, field: &str, value: &str) {
    let uuid_shaped =
        value.len() == 32 && value.chars().all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c));
    if !uuid_shaped {
        violations.push(Violation::new(field, "must be 32 uppercase hexadecimal characters"));
    }
}
