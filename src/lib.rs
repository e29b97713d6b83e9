//! Swish payment provider client library.
//!
//! A thin, typed binding for the [Swish](https://www.swish.nu/) REST API:
//! payment creation, retrieval and cancellation, refunds, and commerce
//! QR-code generation. Every operation is a single HTTP round-trip over
//! mutual TLS, mapped to a typed model.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   Your service   │
//! └────────┬─────────┘
//!          │ typed operations
//! ┌────────▼─────────────────────────────────────┐
//! │          swish-client (this crate)           │
//! │  ┌─────────────┐      ┌───────────────────┐  │
//! │  │   Models    │──────│  MtlsTransport    │  │
//! │  │ (wire JSON  │      │  (client cert +   │  │
//! │  │  mapping)   │      │   server verify)  │  │
//! │  └─────────────┘      └───────────────────┘  │
//! └────────┬─────────────────────────────────────┘
//!          │ HTTPS + mutual TLS
//! ┌────────▼─────────┐
//! │  Swish (prod or  │
//! │  merchant sim)   │
//! └──────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rust_decimal::Decimal;
//! use swish_client::{
//!     CreatePaymentParams, Environment, ServerVerification, SwishClient, TlsConfig,
//! };
//!
//! # async fn example() -> swish_client::Result<()> {
//! // Swish issues each merchant a client certificate; every request
//! // presents it.
//! let tls = TlsConfig::from_pem_files(
//!     "certs/client.pem",
//!     "certs/client.key",
//!     ServerVerification::CaBundle("certs/swish.pem".into()),
//! )?;
//!
//! let client = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls)?;
//!
//! let payment = client
//!     .create_payment(CreatePaymentParams {
//!         amount: Decimal::new(100, 0),
//!         currency: "SEK".to_owned(),
//!         callback_url: "https://example.com/api/swishcb/paymentrequests".to_owned(),
//!         instruction_id: "11A86BE70EA346E4B1C39C874173F088".to_owned(),
//!         payee_payment_reference: Some("0123456789".to_owned()),
//!         message: Some("Kingston USB Flash Drive 8 GB".to_owned()),
//!         payer_alias: Some("4671234768".to_owned()),
//!     })
//!     .await?;
//!
//! let fetched = client.get_payment(payment.id.as_deref().unwrap_or_default()).await?;
//! println!("status: {:?}", fetched.status);
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the [`SwishClient`] operations, one HTTP round-trip each
//! - [`models`]: typed models with explicit domain ⇄ wire field mapping
//! - [`environment`]: the fixed production / merchant-simulator registry
//! - [`transport`]: the mutual-TLS reqwest wrapper and its configuration
//! - [`error`]: the [`SwishError`] taxonomy
//!
//! # Error Handling
//!
//! All operations return [`Result<T, SwishError>`](Result). Business
//! rejections (HTTP 422) surface as [`SwishError::Api`] with the provider's
//! decoded error list, so callers can branch on error codes:
//!
//! ```rust,no_run
//! # use swish_client::{CreatePaymentParams, SwishClient, SwishError};
//! # async fn example(client: SwishClient, params: CreatePaymentParams) {
//! match client.create_payment(params).await {
//!     Ok(payment) => println!("created: {:?}", payment.id),
//!     Err(SwishError::Api(entries)) => {
//!         for entry in entries {
//!             eprintln!("rejected: {entry}");
//!         }
//!     }
//!     Err(e) => eprintln!("transport failure: {e}"),
//! }
//! # }
//! ```
//!
//! # What this crate does not do
//!
//! No retries, no backoff, no caching, no callback-webhook server, no
//! QR-image decoding. Callers own retry and idempotency using the
//! `instruction_id` they supply; Swish treats it as an idempotency key per
//! endpoint.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod environment;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{CreatePaymentParams, CreateRefundParams, SwishClient};
pub use environment::Environment;
pub use error::{ApiErrorEntry, Result, SwishError, Violation};
pub use models::{CommerceQrCodeRequest, Operation, OperationKind, Payment, QrFormat, Refund};
pub use transport::{MtlsTransport, ServerVerification, TlsConfig, TransportConfig};
