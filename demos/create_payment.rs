//! Create a payment request against the Swish merchant test simulator.
//!
//! # Running this demo
//!
//! Download the merchant simulator test certificates from the Swish
//! developer portal, then:
//!
//! ```bash
//! export SWISH_CERT=certs/client.pem
//! export SWISH_KEY=certs/client.key
//! cargo run --example create_payment
//! ```

use std::env;

use rust_decimal::Decimal;
use swish_client::{
    CreatePaymentParams, Environment, ServerVerification, SwishClient, TlsConfig,
};

fn instruction_id() -> String {
    uuid::Uuid::new_v4().simple().to_string().to_uppercase()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("Swish client: payment creation demo\n");

    // Step 1: Load the merchant client certificate.
    println!("1. Loading TLS material...");
    let cert = env::var("SWISH_CERT").unwrap_or_else(|_| "certs/client.pem".to_owned());
    let key = env::var("SWISH_KEY").unwrap_or_else(|_| "certs/client.key".to_owned());
    // The simulator's server certificate is self-signed, so verification is
    // disabled here. Production must use ServerVerification::CaBundle.
    let tls = TlsConfig::from_pem_files(&cert, &key, ServerVerification::Disabled)?;
    println!("   client certificate: {cert}");

    // Step 2: Build the client against the merchant simulator.
    println!("\n2. Creating client...");
    let client = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls)?;
    println!("   environment: {}", client.environment());

    // Step 3: Create a payment request. No payer alias is given, so this is
    // the app-to-app flow and Swish returns a request token.
    let id = instruction_id();
    println!("\n3. Creating payment request {id}...");
    match client
        .create_payment(CreatePaymentParams {
            amount: Decimal::new(100, 0),
            currency: "SEK".to_owned(),
            callback_url: "https://example.com/api/swishcb/paymentrequests".to_owned(),
            instruction_id: id.clone(),
            payee_payment_reference: Some("0123456789".to_owned()),
            message: Some("Kingston USB Flash Drive 8 GB".to_owned()),
            payer_alias: None,
        })
        .await
    {
        Ok(payment) => {
            println!("   created!");
            println!("   - id: {:?}", payment.id);
            println!("   - location: {:?}", payment.location);
            println!("   - request token: {:?}", payment.request_token);

            // Step 4: Read it back.
            println!("\n4. Fetching payment {id}...");
            let fetched = client.get_payment(&id).await?;
            println!("   - status: {:?}", fetched.status);
            println!("   - amount: {:?} {:?}", fetched.amount, fetched.currency);
        }
        Err(e) => {
            eprintln!("   creation failed: {e}");
            eprintln!("   (expected without valid simulator certificates)");
        }
    }

    println!("\nDemo complete");
    Ok(())
}
