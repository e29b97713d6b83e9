//! Pay a request in the merchant simulator, then refund it.
//!
//! # Running this demo
//!
//! ```bash
//! export SWISH_CERT=certs/client.pem
//! export SWISH_KEY=certs/client.key
//! cargo run --example refund_flow
//! ```

use std::env;

use rust_decimal::Decimal;
use swish_client::{
    CreatePaymentParams, CreateRefundParams, Environment, ServerVerification, SwishClient,
    TlsConfig,
};

fn instruction_id() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Swish client: refund flow demo\n");

    let cert = env::var("SWISH_CERT").unwrap_or_else(|_| "certs/client.pem".to_owned());
    let key = env::var("SWISH_KEY").unwrap_or_else(|_| "certs/client.key".to_owned());
    let tls = TlsConfig::from_pem_files(&cert, &key, ServerVerification::Disabled)?;
    let client = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls)?;

    // Step 1: Create and fetch a payment. The simulator marks payments paid
    // on its own, so the fetched payment carries a paymentReference.
    let payment_id = instruction_id();
    println!("1. Creating payment {payment_id}...");
    let created = client
        .create_payment(CreatePaymentParams {
            amount: Decimal::new(100, 0),
            currency: "SEK".to_owned(),
            callback_url: "https://example.com/api/swishcb/paymentrequests".to_owned(),
            instruction_id: payment_id.clone(),
            payee_payment_reference: Some("0123456789".to_owned()),
            message: Some("Kingston USB Flash Drive 8 GB".to_owned()),
            payer_alias: Some("4671234768".to_owned()),
        })
        .await?;
    println!("   created: {:?}", created.id);

    println!("\n2. Fetching payment to obtain its payment reference...");
    let payment = client.get_payment(&payment_id).await?;
    let Some(reference) = payment.payment_reference else {
        eprintln!("   no payment reference yet (payment not settled); aborting");
        return Ok(());
    };
    println!("   payment reference: {reference}");

    // Step 2: Refund it. The merchant is the payer here: refunds reverse
    // the money flow.
    let refund_id = instruction_id();
    println!("\n3. Creating refund {refund_id}...");
    let refund = client
        .create_refund(CreateRefundParams {
            original_payment_reference: reference,
            amount: Decimal::new(100, 0),
            currency: "SEK".to_owned(),
            callback_url: "https://example.com/api/swishcb/refunds".to_owned(),
            instruction_id: refund_id.clone(),
            payer_payment_reference: Some("0123456789".to_owned()),
            payment_reference: None,
            payee_alias: None,
            message: Some("Refund for Kingston USB Flash Drive 8 GB".to_owned()),
        })
        .await?;
    println!("   created: {:?} at {:?}", refund.id, refund.location);

    println!("\n4. Fetching refund...");
    let fetched = client.get_refund(&refund_id).await?;
    println!("   - status: {:?}", fetched.status);
    println!("   - amount: {:?} {:?}", fetched.amount, fetched.currency);

    println!("\nDemo complete");
    Ok(())
}
