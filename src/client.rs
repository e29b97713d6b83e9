//! The Swish client: one typed operation per API round-trip.
//!
//! Every public operation maps to a single HTTP call against the configured
//! environment. There is no retry logic anywhere: a failed round-trip is
//! surfaced immediately, and callers own retry and idempotency using the
//! `instruction_id` they supply (Swish treats it as an idempotency key per
//! endpoint).

use rust_decimal::Decimal;
use tracing::{info, instrument};

use crate::{
    environment::Environment,
    error::{ApiErrorEntry, Result, SwishError, Violation},
    models::{CommerceQrCodeRequest, Operation, Payment, Refund},
    transport::{MtlsTransport, TlsConfig, TransportConfig, TransportResponse},
};

/// Parameters for creating a payment request.
///
/// Omitting `payer_alias` selects the app-to-app (m-commerce) flow: Swish
/// answers with a `request_token` the payer's app opens. Supplying it selects
/// the alias-redirect (e-commerce) flow and no token is returned. Both are
/// successful outcomes.
#[derive(Debug, Clone)]
pub struct CreatePaymentParams {
    /// Amount to request.
    pub amount: Decimal,
    /// 3-letter ISO 4217 currency code.
    pub currency: String,
    /// HTTPS URL Swish calls back with the payment result.
    pub callback_url: String,
    /// Caller-supplied idempotency key: a UUID as 32 uppercase hex digits.
    pub instruction_id: String,
    /// Merchant-side order reference.
    pub payee_payment_reference: Option<String>,
    /// Message shown to the payer.
    pub message: Option<String>,
    /// The payer's Swish number; omit for the app-to-app flow.
    pub payer_alias: Option<String>,
}

impl CreatePaymentParams {
    /// Builds the outbound payment model. The merchant is the payee: money
    /// flows from the payer to the merchant alias.
    fn into_payment(self, merchant_alias: &str) -> Payment {
        Payment {
            payee_alias: Some(merchant_alias.to_owned()),
            amount: Some(self.amount),
            currency: Some(self.currency),
            callback_url: Some(self.callback_url),
            callback_identifier: Some(self.instruction_id),
            payee_payment_reference: self.payee_payment_reference,
            message: self.message,
            payer_alias: self.payer_alias,
            ..Payment::default()
        }
    }
}

/// Parameters for creating a refund.
#[derive(Debug, Clone)]
pub struct CreateRefundParams {
    /// `paymentReference` of the original payment being refunded.
    pub original_payment_reference: String,
    /// Amount to refund.
    pub amount: Decimal,
    /// 3-letter ISO 4217 currency code.
    pub currency: String,
    /// HTTPS URL Swish calls back with the refund result.
    pub callback_url: String,
    /// Caller-supplied idempotency key: a UUID as 32 uppercase hex digits.
    pub instruction_id: String,
    /// Merchant-side refund reference.
    pub payer_payment_reference: Option<String>,
    /// Provider payment reference to attach, if any.
    pub payment_reference: Option<String>,
    /// The customer's Swish number receiving the refund.
    pub payee_alias: Option<String>,
    /// Message shown to the refund recipient.
    pub message: Option<String>,
}

impl CreateRefundParams {
    /// Builds the outbound refund model. A refund reverses the money flow,
    /// so here the merchant is the *payer* and the customer the payee.
    fn into_refund(self, merchant_alias: &str) -> Refund {
        Refund {
            payer_alias: Some(merchant_alias.to_owned()),
            payee_alias: self.payee_alias,
            original_payment_reference: Some(self.original_payment_reference),
            amount: Some(self.amount),
            currency: Some(self.currency),
            callback_url: Some(self.callback_url),
            callback_identifier: Some(self.instruction_id),
            payer_payment_reference: self.payer_payment_reference,
            payment_reference: self.payment_reference,
            message: self.message,
            ..Refund::default()
        }
    }
}

/// Client for the Swish payment provider REST API.
///
/// Configuration (environment, merchant alias, TLS material) is fixed at
/// construction and never mutated, so a client can be shared freely across
/// tasks and threads.
///
/// # Examples
///
/// ```rust,no_run
/// use rust_decimal::Decimal;
/// use swish_client::{
///     CreatePaymentParams, Environment, ServerVerification, SwishClient, TlsConfig,
/// };
///
/// # async fn example() -> swish_client::Result<()> {
/// let tls = TlsConfig::from_pem_files(
///     "certs/client.pem",
///     "certs/client.key",
///     ServerVerification::CaBundle("certs/swish.pem".into()),
/// )?;
/// let client = SwishClient::new(Environment::MerchantSimulator, "1231181189", &tls)?;
///
/// let payment = client
///     .create_payment(CreatePaymentParams {
///         amount: Decimal::new(100, 0),
///         currency: "SEK".to_owned(),
///         callback_url: "https://example.com/api/swishcb/paymentrequests".to_owned(),
///         instruction_id: "11A86BE70EA346E4B1C39C874173F088".to_owned(),
///         payee_payment_reference: Some("0123456789".to_owned()),
///         message: Some("Kingston USB Flash Drive 8 GB".to_owned()),
///         payer_alias: None,
///     })
///     .await?;
///
/// // No payer alias was given, so the app-to-app token is present.
/// println!("token: {:?}", payment.request_token);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SwishClient {
    environment: Environment,
    merchant_alias: String,
    transport: MtlsTransport,
}

impl SwishClient {
    /// Creates a client with default transport settings.
    ///
    /// `merchant_alias` is the merchant's Swish number; it becomes the payee
    /// of created payments and the payer of created refunds.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::Certificate`] if the TLS material does not
    /// parse.
    pub fn new(
        environment: Environment,
        merchant_alias: impl Into<String>,
        tls: &TlsConfig,
    ) -> Result<Self> {
        Self::with_transport_config(environment, merchant_alias, tls, &TransportConfig::default())
    }

    /// Creates a client with custom transport settings.
    ///
    /// # Errors
    ///
    /// Fails as [`new`](Self::new) does, or with a validation error for
    /// out-of-bounds transport settings.
    pub fn with_transport_config(
        environment: Environment,
        merchant_alias: impl Into<String>,
        tls: &TlsConfig,
        config: &TransportConfig,
    ) -> Result<Self> {
        Ok(Self {
            environment,
            merchant_alias: merchant_alias.into(),
            transport: MtlsTransport::with_config(tls, config)?,
        })
    }

    /// Creates a client from a symbolic environment name (`"production"`,
    /// `"mss"`, ...).
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::UnknownEnvironment`] for an unrecognized name,
    /// and otherwise fails as [`new`](Self::new) does.
    pub fn from_environment_name(
        name: &str,
        merchant_alias: impl Into<String>,
        tls: &TlsConfig,
    ) -> Result<Self> {
        Self::new(Environment::from_name(name)?, merchant_alias, tls)
    }

    /// The environment this client targets.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The configured merchant Swish number.
    #[must_use]
    pub fn merchant_alias(&self) -> &str {
        &self.merchant_alias
    }

    /// Creates a payment request.
    ///
    /// Issues `PUT v2/paymentrequests/{instruction_id}`. On success the
    /// returned [`Payment`] carries `id` (the trailing segment of the
    /// `Location` header), `location` (the full header value), and
    /// `request_token` (only for the app-to-app flow, i.e. when
    /// `payer_alias` was omitted).
    ///
    /// # Errors
    ///
    /// [`SwishError::Validation`] before any network call if the parameters
    /// violate local constraints; [`SwishError::Api`] on HTTP 422;
    /// [`SwishError::UnexpectedStatus`] on any other non-success status.
    #[instrument(skip(self, params), fields(instruction_id = %params.instruction_id))]
    pub async fn create_payment(&self, params: CreatePaymentParams) -> Result<Payment> {
        let path = format!("/v2/paymentrequests/{}", params.instruction_id);
        let body = params.into_payment(&self.merchant_alias).to_wire()?;
        let response = self.transport.put(self.environment.base_url(), &path, &body).await?;
        let payment = created_payment(&response)?;
        info!(id = payment.id.as_deref().unwrap_or_default(), "payment request created");
        Ok(payment)
    }

    /// Fetches a payment request by id.
    ///
    /// Issues `GET v1/paymentrequests/{id}` and decodes the full payment
    /// from the response body.
    ///
    /// # Errors
    ///
    /// [`SwishError::UnexpectedStatus`] on any non-success status.
    #[instrument(skip(self))]
    pub async fn get_payment(&self, payment_request_id: &str) -> Result<Payment> {
        let path = format!("/v1/paymentrequests/{payment_request_id}");
        let response = self.transport.get(self.environment.base_url(), &path).await?;
        ensure_success(&response)?;
        Payment::from_wire(decode_json(&response.body)?)
    }

    /// Cancels an unpaid payment request.
    ///
    /// Issues `PATCH v1/paymentrequests/{id}` with the one-element JSON-Patch
    /// document `[{"op":"Cancel"}]` and returns the provider's updated
    /// payment representation as-is; the returned `status` is not
    /// interpreted by the client.
    ///
    /// # Errors
    ///
    /// [`SwishError::UnexpectedStatus`] on any non-success status.
    #[instrument(skip(self))]
    pub async fn cancel_payment(&self, payment_request_id: &str) -> Result<Payment> {
        let path = format!("/v1/paymentrequests/{payment_request_id}");
        let body = cancel_patch_body()?;
        let response = self.transport.patch(self.environment.base_url(), &path, &body).await?;
        ensure_success(&response)?;
        let payment = Payment::from_wire(decode_json(&response.body)?)?;
        info!(status = payment.status.as_deref().unwrap_or_default(), "payment request cancelled");
        Ok(payment)
    }

    /// Creates a refund for a previously paid payment.
    ///
    /// Issues `PUT v2/refunds/{instruction_id}`. The merchant alias is sent
    /// as the refund's *payer* (refunds reverse the money flow). On success
    /// the returned [`Refund`] carries `id` and `location` from the
    /// `Location` header.
    ///
    /// # Errors
    ///
    /// [`SwishError::Validation`] before any network call if the parameters
    /// violate local constraints; [`SwishError::Api`] on HTTP 422;
    /// [`SwishError::UnexpectedStatus`] on any other non-success status.
    #[instrument(skip(self, params), fields(instruction_id = %params.instruction_id))]
    pub async fn create_refund(&self, params: CreateRefundParams) -> Result<Refund> {
        let path = format!("/v2/refunds/{}", params.instruction_id);
        let body = params.into_refund(&self.merchant_alias).to_wire()?;
        let response = self.transport.put(self.environment.base_url(), &path, &body).await?;
        let refund = created_refund(&response)?;
        info!(id = refund.id.as_deref().unwrap_or_default(), "refund created");
        Ok(refund)
    }

    /// Fetches a refund by id.
    ///
    /// Issues `GET v1/refunds/{id}` and decodes the full refund from the
    /// response body.
    ///
    /// # Errors
    ///
    /// [`SwishError::UnexpectedStatus`] on any non-success status.
    #[instrument(skip(self))]
    pub async fn get_refund(&self, refund_id: &str) -> Result<Refund> {
        let path = format!("/v1/refunds/{refund_id}");
        let response = self.transport.get(self.environment.base_url(), &path).await?;
        ensure_success(&response)?;
        Refund::from_wire(decode_json(&response.body)?)
    }

    /// Renders a payment-request token as a scannable QR image.
    ///
    /// Issues a PUT against the QR generator's own base URL (a different
    /// host than the payment endpoints) and returns the raw image bytes,
    /// unparsed.
    ///
    /// # Errors
    ///
    /// [`SwishError::Validation`] for an invalid request;
    /// [`SwishError::UnexpectedStatus`] on any non-success status.
    #[instrument(skip(self, request), fields(format = ?request.format))]
    pub async fn commerce_qr_code(&self, request: CommerceQrCodeRequest) -> Result<Vec<u8>> {
        let body = request.to_wire()?;
        let response = self.transport.put(self.environment.qr_url(), "/commerce", &body).await?;
        ensure_success(&response)?;
        Ok(response.body)
    }
}

/// The JSON-Patch document for cancellation: exactly one `Cancel` operation.
fn cancel_patch_body() -> Result<serde_json::Value> {
    serde_json::to_value([Operation::cancel()])
        .map_err(|e| SwishError::Validation(vec![Violation::new("body", e.to_string())]))
}

/// Fails with [`SwishError::UnexpectedStatus`] unless the status is 2xx.
fn ensure_success(response: &TransportResponse) -> Result<()> {
    if response.is_success() {
        Ok(())
    } else {
        Err(SwishError::UnexpectedStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        })
    }
}

/// Status handling for the creation endpoints, which report business errors
/// as 422 with a structured body.
fn ensure_created(response: &TransportResponse) -> Result<()> {
    if response.status == 422 {
        return Err(api_error(response));
    }
    ensure_success(response)
}

/// Decodes a 422 body into the provider error list. A body that does not
/// parse as one degrades to a plain status error.
fn api_error(response: &TransportResponse) -> SwishError {
    match serde_json::from_slice::<Vec<ApiErrorEntry>>(&response.body) {
        Ok(entries) => SwishError::Api(entries),
        Err(_) => SwishError::UnexpectedStatus {
            status: response.status,
            body: String::from_utf8_lossy(&response.body).into_owned(),
        },
    }
}

fn decode_json(body: &[u8]) -> Result<serde_json::Value> {
    serde_json::from_slice(body).map_err(|e| {
        SwishError::Validation(vec![Violation::new("body", format!("response body is not valid JSON: {e}"))])
    })
}

/// The trailing path segment of a `Location` header value.
fn trailing_segment(location: &str) -> &str {
    location.rsplit('/').next().unwrap_or(location)
}

/// Builds the creation result for a payment: identifiers come from response
/// headers, not the (empty) body.
fn created_payment(response: &TransportResponse) -> Result<Payment> {
    ensure_created(response)?;
    let location = response.header("Location").map(str::to_owned);
    Ok(Payment {
        id: location.as_deref().map(|l| trailing_segment(l).to_owned()),
        location,
        request_token: response.header("PaymentRequestToken").map(str::to_owned),
        ..Payment::default()
    })
}

/// Builds the creation result for a refund. Refund creation never returns a
/// request token.
fn created_refund(response: &TransportResponse) -> Result<Refund> {
    ensure_created(response)?;
    let location = response.header("Location").map(str::to_owned);
    Ok(Refund {
        id: location.as_deref().map(|l| trailing_segment(l).to_owned()),
        location,
        ..Refund::default()
    })
}
