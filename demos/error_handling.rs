//! Handling the Swish error taxonomy.
//!
//! Demonstrates the three failure classes callers should distinguish:
//! local validation (nothing sent), provider business rejection (HTTP 422),
//! and transport errors.
//!
//! # Running this demo
//!
//! ```bash
//! export SWISH_CERT=certs/client.pem
//! export SWISH_KEY=certs/client.key
//! cargo run --example error_handling
//! ```

use std::env;

use rust_decimal::Decimal;
use swish_client::{
    CreatePaymentParams, Environment, ServerVerification, SwishClient, SwishError, TlsConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Swish client: error handling demo\n");

    let cert = env::var("SWISH_CERT").unwrap_or_else(|_| "certs/client.pem".to_owned());
    let key = env::var("SWISH_KEY").unwrap_or_else(|_| "certs/client.key".to_owned());
    let tls = TlsConfig::from_pem_files(&cert, &key, ServerVerification::Disabled)?;
    let client = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls)?;

    // Case 1: local validation. The request never leaves the process; every
    // violated constraint is reported at once.
    println!("1. Local validation failure:");
    let result = client
        .create_payment(CreatePaymentParams {
            amount: Decimal::new(-100, 0),
            currency: "kronor".to_owned(),
            callback_url: "http://insecure.example.com".to_owned(),
            instruction_id: "not-an-instruction-id".to_owned(),
            payee_payment_reference: None,
            message: None,
            payer_alias: None,
        })
        .await;
    match result {
        Err(SwishError::Validation(violations)) => {
            for violation in violations {
                println!("   - {violation}");
            }
        }
        other => println!("   unexpected outcome: {other:?}"),
    }

    // Case 2: provider business rejection. The simulator maps certain
    // message values to forced error codes; "BE18" forces an invalid-alias
    // rejection.
    println!("\n2. Provider rejection (HTTP 422):");
    let result = client
        .create_payment(CreatePaymentParams {
            amount: Decimal::new(100, 0),
            currency: "SEK".to_owned(),
            callback_url: "https://example.com/api/swishcb/paymentrequests".to_owned(),
            instruction_id: uuid::Uuid::new_v4().simple().to_string().to_uppercase(),
            payee_payment_reference: None,
            message: Some("BE18".to_owned()),
            payer_alias: None,
        })
        .await;
    match result {
        Err(SwishError::Api(entries)) => {
            for entry in entries {
                println!("   - {entry}");
            }
        }
        Err(e) => println!("   transport failure instead: {e}"),
        Ok(payment) => println!("   simulator accepted it: {:?}", payment.id),
    }

    // Case 3: transport errors pass through from reqwest unmodified.
    println!("\n3. Transport failure:");
    match client.get_payment("11A86BE70EA346E4B1C39C874173F088").await {
        Err(SwishError::UnexpectedStatus { status, .. }) => {
            println!("   provider answered HTTP {status}");
        }
        Err(SwishError::Http(e)) => println!("   network error: {e}"),
        Err(e) => println!("   other error: {e}"),
        Ok(payment) => println!("   found payment: {:?}", payment.id),
    }

    println!("\nDemo complete");
    Ok(())
}
