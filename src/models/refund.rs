//! Refund model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{
    check_amount, check_callback_url, check_currency, check_instruction_id, from_wire_value,
    to_wire_value,
};
use crate::error::{Result, Violation};

/// A Swish refund.
///
/// Refunds reverse the money flow of a payment: the merchant is the
/// `payer_alias` here and the customer the `payee_alias`. That asymmetry
/// against [`Payment`](super::Payment) is intentional and part of the wire
/// contract.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Refund {
    /// Refund identifier (the trailing segment of `location`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Full `Location` header value returned on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// The merchant's Swish number (money flows from this alias).
    #[serde(rename = "payerAlias", default, skip_serializing_if = "Option::is_none")]
    pub payer_alias: Option<String>,
    /// The customer's Swish number receiving the refund.
    #[serde(rename = "payeeAlias", default, skip_serializing_if = "Option::is_none")]
    pub payee_alias: Option<String>,
    /// `paymentReference` of the original payment being refunded.
    #[serde(
        rename = "originalPaymentReference",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub original_payment_reference: Option<String>,
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
    /// URL Swish calls back with the refund result.
    #[serde(rename = "callbackUrl", default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Caller-supplied idempotency key, echoed in callbacks.
    #[serde(rename = "callbackIdentifier", default, skip_serializing_if = "Option::is_none")]
    pub callback_identifier: Option<String>,
    /// Merchant-side refund reference.
    #[serde(rename = "payerPaymentReference", default, skip_serializing_if = "Option::is_none")]
    pub payer_payment_reference: Option<String>,
    /// Provider-assigned reference for the refund transaction.
    #[serde(rename = "paymentReference", default, skip_serializing_if = "Option::is_none")]
    pub payment_reference: Option<String>,
    /// Message shown to the refund recipient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Provider status string (`CREATED`, `PAID`, `ERROR`, ...). Passed
    /// through without interpretation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// When the refund was created.
    #[serde(rename = "dateCreated", default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// When the refund was paid out, if it was.
    #[serde(rename = "datePaid", default, skip_serializing_if = "Option::is_none")]
    pub date_paid: Option<DateTime<Utc>>,
    /// Provider error code for failed refunds.
    #[serde(rename = "errorCode", default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Provider error message for failed refunds.
    #[serde(rename = "errorMessage", default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Refund {
    /// Produces the wire JSON mapping for this refund.
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

    /// Decodes a refund from a wire JSON value.
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

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::error::SwishError;

    fn full_refund() -> Refund {
        Refund {
            id: Some("ABC2D7406ECE4542A80152D909EF9F6B".to_owned()),
            location: Some(
                "https://mss.cpc.getswish.net/swish-cpcapi/api/v1/refunds/ABC2D7406ECE4542A80152D909EF9F6B"
                    .to_owned(),
            ),
            payer_alias: Some("1231181189".to_owned()),
            payee_alias: Some("4671234768".to_owned()),
            original_payment_reference: Some("6D6CD7406ECE4542A80152D909EF9F6B".to_owned()),
            amount: Some(Decimal::new(100, 0)),
            currency: Some("SEK".to_owned()),
            callback_url: Some("https://example.com/api/swishcb/refunds".to_owned()),
            callback_identifier: Some("D2ABB10282AE4A47BBD8B63DAF64E8CC".to_owned()),
            payer_payment_reference: Some("0123456789".to_owned()),
            payment_reference: Some("1E2FC19E5E5E4E18916609B7F8911C12".to_owned()),
            message: Some("Refund for Kingston USB Flash Drive 8 GB".to_owned()),
            status: Some("PAID".to_owned()),
            date_created: Some("2022-04-13T09:05:32Z".parse().unwrap()),
            date_paid: Some("2022-04-13T09:05:51Z".parse().unwrap()),
            error_code: None,
            error_message: None,
        }
    }

    #[test]
    fn test_wire_names_are_the_swish_vocabulary() {
        let wire = full_refund().to_wire().unwrap();
        let object = wire.as_object().unwrap();
        for key in [
            "payerAlias",
            "payeeAlias",
            "originalPaymentReference",
            "callbackUrl",
            "callbackIdentifier",
            "payerPaymentReference",
            "paymentReference",
            "dateCreated",
            "datePaid",
        ] {
            assert!(object.contains_key(key), "missing wire field {key}");
        }
        assert!(!object.contains_key("original_payment_reference"));
    }

    #[test]
    fn test_round_trip_full() {
        let refund = full_refund();
        let decoded = Refund::from_wire(refund.to_wire().unwrap()).unwrap();
        assert_eq!(decoded, refund);
    }

    #[test]
    fn test_partial_refund_omits_unset_fields() {
        let refund = Refund {
            payer_alias: Some("1231181189".to_owned()),
            original_payment_reference: Some("6D6CD7406ECE4542A80152D909EF9F6B".to_owned()),
            amount: Some(Decimal::new(2550, 2)),
            currency: Some("SEK".to_owned()),
            ..Default::default()
        };
        let wire = refund.to_wire().unwrap();
        let object = wire.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert!(!object.contains_key("payeeAlias"));
        assert!(object.values().all(|v| !v.is_null()));
        assert_eq!(wire["amount"], json!(25.5));
    }

    #[test]
    fn test_from_wire_tolerates_missing_optionals() {
        let refund = Refund::from_wire(json!({
            "id": "ABC2D7406ECE4542A80152D909EF9F6B",
            "status": "DEBITED"
        }))
        .unwrap();
        assert_eq!(refund.status.as_deref(), Some("DEBITED"));
        assert!(refund.amount.is_none());
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let refund = Refund {
            amount: Some(Decimal::ZERO),
            currency: Some("S".to_owned()),
            callback_url: Some("http://example.com".to_owned()),
            ..Default::default()
        };
        let error = refund.to_wire().unwrap_err();
        let SwishError::Validation(violations) = error else {
            panic!("expected a validation error");
        };
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert!(fields.contains(&"amount"));
        assert!(fields.contains(&"currency"));
        assert!(fields.contains(&"callbackUrl"));
    }
}
