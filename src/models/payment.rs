//! Payment request model and the cancellation patch operation.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    check_amount, check_callback_url, check_currency, check_instruction_id, from_wire_value,
    to_wire_value,
};
use crate::error::{Result, Violation};

/// A Swish payment request.
///
/// Constructed client-side for outbound creation (a subset of fields
/// populated), or decoded from a response body (full or partial fields,
/// depending on the endpoint). `location` and `request_token` are populated
/// from response headers on creation; the provider never sends them in a
/// body.
///
/// The serde rename table below is the wire contract with the Swish API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    /// Payment request identifier (the trailing segment of `location`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full `Location` header value returned on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Token for the app-to-app (m-commerce) flow, from the
    /// `PaymentRequestToken` response header. Absent when a payer alias was
    /// supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_token: Option<String>,
    /// The merchant's Swish number (money flows to this alias).
    #[serde(rename = "payeeAlias", default, skip_serializing_if = "Option::is_none")]
    pub payee_alias: Option<String>,
    /// Amount in the given currency.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::float_option"
    )]
    pub amount: Option<Decimal>,
    /// 3-letter ISO 4217 currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// URL Swish calls back with the payment result.
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Caller-supplied idempotency key, echoed in callbacks.
    #[serde(rename = "callbackIdentifier", default, skip_serializing_if = "Option::is_none")]
    pub callback_identifier: Option<String>,
    /// Merchant-side order reference.
    #[serde(rename = "payeePaymentReference", default, skip_serializing_if = "Option::is_none")]
    pub payee_payment_reference: Option<String>,
    /// Message shown to the payer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payer's Swish number. Omitted for the app-to-app flow.
    #[serde(rename = "payerAlias", default, skip_serializing_if = "Option::is_none")]
    pub payer_alias: Option<String>,
    /// Provider-assigned payment reference, set once the payment settles.
    #[serde(rename = "paymentReference", default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    /// Provider status string (`CREATED`, `PAID`, `DECLINED`, ...). The
    /// client passes it through without interpretation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// When the payment request was created.
    #[serde(rename = "dateCreated", default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// When the payment was paid, if it was.
    #[serde(rename = "datePaid", default, skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<DateTime<Utc>>,
    /// Provider error code for failed payments.
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Provider error message for failed payments.
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Payment {
    /// Produces the wire JSON mapping for this payment.
    ///
    /// Unset fields are omitted entirely, never sent as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Validation`](crate::SwishError::Validation)
    /// listing every violated constraint.
    pub fn to_wire(&self) -> Result<serde_json::Value> {
        to_wire_value(self, self.validate())
    }

    /// Decodes a payment from a wire JSON value.
    ///
    /// Missing optional fields are tolerated; malformed fields fail with a
    /// validation error.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Validation`](crate::SwishError::Validation) if
    /// the value does not decode.
    pub fn from_wire(value: serde_json::Value) -> Result<Self> {
        from_wire_value(value)
    }

    /// Checks the local constraints of every populated field.
    ///
    /// Returns one entry per violated constraint; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if let Some(amount) = self.amount {
            check_amount(&mut violations, "amount", amount);
        }
        if let Some(currency) = &self.currency {
            check_currency(&mut violations, "currency", currency);
        }
        if let Some(url) = &self.callback_url {
            check_callback_url(&mut violations, "callbackUrl", url);
        }
        if let Some(identifier) = &self.callback_identifier {
            check_instruction_id(&mut violations, "callbackIdentifier", identifier);
        }
        violations
    }
}

/// Kind of a JSON-Patch operation understood by the payment endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationKind {
    /// Cancel an unpaid payment request.
    Cancel,
}

/// A single element of the JSON-Patch document sent to cancel a payment.
///
/// Cancellation sends exactly one of these, as a one-element array, with the
/// `application/json-patch+json` content type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// The operation to apply.
    pub op: OperationKind,
}

impl Operation {
    /// The cancellation operation.
    #[must_use]
    pub fn cancel() -> Self {
        Self { op: OperationKind::Cancel }
    }
}
