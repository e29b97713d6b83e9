//! Integration tests for the Swish client configuration and marshaling flow.
//!
//! These exercise the public API end to end (environment resolution, TLS
//! configuration, model wire mapping, and the error taxonomy) without a
//! live Swish deployment.

use rust_decimal::Decimal;
use serde_json::json;
use swish_client::{
    ApiErrorEntry, CommerceQrCodeRequest, Environment, Operation, Payment, QrFormat, Refund,
    ServerVerification, SwishClient, SwishError, TlsConfig, TransportConfig,
};

#[test]
fn test_environment_resolution_flow() {
    let env = Environment::from_name("mss").expect("mss is a known environment");
    assert_eq!(env, Environment::MerchantSimulator);
    assert_eq!(env.base_url(), "https://mss.cpc.getswish.net/swish-cpcapi/api");
    assert_eq!(env.qr_url(), "https://mpc.getswish.net/qrg-swish/api/v1");

    let err = Environment::from_name("staging").expect_err("staging is not a deployment");
    assert!(matches!(err, SwishError::UnknownEnvironment(name) if name == "staging"));
}

#[test]
fn test_client_construction_rejects_invalid_tls_material() {
    // Construction loads and parses the TLS material eagerly; garbage PEM
    // fails before any request can be made.
    let tls = TlsConfig::from_pem(b"garbage", b"garbage", ServerVerification::Disabled);
    let result = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls);
    assert!(matches!(result, Err(SwishError::Certificate(_))));
}

#[test]
fn test_client_construction_rejects_missing_cert_files() {
    let result = TlsConfig::from_pem_files(
        "/nonexistent/client.pem",
        "/nonexistent/client.key",
        ServerVerification::Disabled,
    );
    assert!(matches!(result, Err(SwishError::Certificate(_))));
}

#[test]
fn test_client_construction_rejects_unknown_environment_name() {
    let tls = TlsConfig::from_pem(b"x", b"y", ServerVerification::Disabled);
    let result = SwishClient::from_environment_name("sandbox", "1231181189", &tls);
    // The environment name is checked before the TLS material.
    assert!(matches!(result, Err(SwishError::UnknownEnvironment(_))));
}

#[test]
fn test_transport_config_bounds_are_enforced_at_construction() {
    let tls = TlsConfig::from_pem(b"x", b"y", ServerVerification::Disabled);
    let config = TransportConfig { timeout_secs: 0, ..TransportConfig::default() };
    let result = SwishClient::with_transport_config(
        Environment::MerchantSimulator,
        "1231181189",
        &tls,
        &config,
    );
    assert!(matches!(result, Err(SwishError::Validation(_))));
}

#[test]
fn test_payment_wire_mapping_round_trip() {
    let payment = Payment {
        payee_alias: Some("1231181189".to_owned()),
        payer_alias: Some("4671234768".to_owned()),
        amount: Some(Decimal::new(10050, 2)),
        currency: Some("SEK".to_owned()),
        callback_url: Some("https://example.com/api/swishcb/paymentrequests".to_owned()),
        callback_identifier: Some("11A86BE70EA346E4B1C39C874173F088".to_owned()),
        payee_payment_reference: Some("0123456789".to_owned()),
        message: Some("Kingston USB Flash Drive 8 GB".to_owned()),
        ..Payment::default()
    };

    let wire = payment.to_wire().expect("payment is valid");
    let object = wire.as_object().expect("wire form is an object");

    // The wire vocabulary is the provider's camelCase one.
    assert_eq!(object["payeeAlias"], json!("1231181189"));
    assert_eq!(object["payerAlias"], json!("4671234768"));
    assert_eq!(object["callbackUrl"], json!("https://example.com/api/swishcb/paymentrequests"));
    assert_eq!(object["amount"], json!(100.5));

    // Unset fields are absent, not null.
    assert!(!object.contains_key("status"));
    assert!(!object.contains_key("errorCode"));
    assert!(object.values().all(|v| !v.is_null()));

    let decoded = Payment::from_wire(wire).expect("wire form decodes");
    assert_eq!(decoded, payment);
}

#[test]
fn test_payment_validation_reports_all_violations_before_any_network_call() {
    let payment = Payment {
        amount: Some(Decimal::new(-1, 0)),
        currency: Some("kronor".to_owned()),
        callback_url: Some("http://insecure.example.com".to_owned()),
        ..Payment::default()
    };
    let err = payment.to_wire().expect_err("three constraints are violated");
    let SwishError::Validation(violations) = err else {
        panic!("expected a validation error, got {err}");
    };
    assert_eq!(violations.len(), 3);
}

#[test]
fn test_refund_wire_mapping_matches_reversed_money_flow() {
    let refund = Refund {
        payer_alias: Some("1231181189".to_owned()),
        payee_alias: Some("4671234768".to_owned()),
        original_payment_reference: Some("6D6CD7406ECE4542A80152D909EF9F6B".to_owned()),
        amount: Some(Decimal::new(100, 0)),
        currency: Some("SEK".to_owned()),
        callback_url: Some("https://example.com/api/swishcb/refunds".to_owned()),
        message: Some("Refund for Kingston USB Flash Drive 8 GB".to_owned()),
        ..Refund::default()
    };

    let wire = refund.to_wire().expect("refund is valid");
    assert_eq!(wire["payerAlias"], json!("1231181189"));
    assert_eq!(wire["payeeAlias"], json!("4671234768"));
    assert_eq!(wire["originalPaymentReference"], json!("6D6CD7406ECE4542A80152D909EF9F6B"));

    let decoded = Refund::from_wire(wire).expect("wire form decodes");
    assert_eq!(decoded, refund);
}

#[test]
fn test_provider_error_body_round_trips_into_api_error() {
    let body = json!([
        { "errorCode": "AM06", "errorMessage": "Amount too small" },
        { "errorCode": "RP03", "errorMessage": "Callback URL is missing or does not use HTTPS" }
    ]);
    let entries: Vec<ApiErrorEntry> =
        serde_json::from_value(body).expect("422 bodies decode into error entries");
    let err = SwishError::Api(entries);

    let SwishError::Api(entries) = err else { unreachable!() };
    let codes: Vec<&str> = entries.iter().map(|e| e.error_code.as_str()).collect();
    assert_eq!(codes, ["AM06", "RP03"]);
}

#[test]
fn test_cancellation_patch_document_shape() {
    let body = serde_json::to_value([Operation::cancel()]).unwrap();
    assert_eq!(body, json!([{ "op": "Cancel" }]));
}

#[test]
fn test_qr_request_flow() {
    let request = CommerceQrCodeRequest {
        token: "f34DS34lfd0d03fdDselkfd3ffk21".to_owned(),
        format: QrFormat::Png,
        size: Some(300),
        border: None,
        transparent: Some(false),
    };
    let wire = request.to_wire().expect("request is valid");
    assert_eq!(
        wire,
        json!({
            "token": "f34DS34lfd0d03fdDselkfd3ffk21",
            "format": "png",
            "size": 300,
            "transparent": false,
        })
    );
}

#[test]
fn test_uuid_shaped_instruction_ids_pass_validation() {
    // Instruction ids are produced the way integrators produce them: a UUID
    // v4 rendered without hyphens, uppercased.
    let instruction_id = uuid::Uuid::new_v4().simple().to_string().to_uppercase();
    let payment = Payment {
        callback_identifier: Some(instruction_id),
        ..Payment::default()
    };
    assert!(payment.validate().is_empty());
}
