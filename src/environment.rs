//! Deployment environment registry.
//!
//! Swish runs two deployments relevant to integrators: production and the
//! merchant test simulator (MSS), which mimics production behavior without
//! moving real funds. Each environment exposes a base URL for the payment and
//! refund endpoints and a separate base URL for the commerce QR generator.
//!
//! Environments are a fixed, immutable set. Look one up by name with
//! [`Environment::from_name`], or pass a variant directly to
//! [`SwishClient::new`](crate::SwishClient::new).

use std::str::FromStr;

use crate::error::{Result, SwishError};

const PRODUCTION_BASE_URL: &str = "https://cpc.getswish.net/swish-cpcapi/api";
const MSS_BASE_URL: &str = "https://mss.cpc.getswish.net/swish-cpcapi/api";
const QR_BASE_URL: &str = "https://mpc.getswish.net/qrg-swish/api/v1";

/// A Swish deployment target.
///
/// # Examples
///
/// ```
/// use swish_client::Environment;
///
/// let env = Environment::from_name("mss")?;
/// assert_eq!(env, Environment::MerchantSimulator);
/// assert!(env.base_url().starts_with("https://mss."));
/// # Ok::<(), swish_client::SwishError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Production: real merchants, real funds.
    Production,
    /// Merchant test simulator (MSS): production-like responses, no funds
    /// moved.
    MerchantSimulator,
}

impl Environment {
    /// Resolves a symbolic environment name.
    ///
    /// Accepts `"production"` (alias `"prod"`) and `"mss"` (alias `"test"`),
    /// case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`SwishError::UnknownEnvironment`] for any other name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "mss" | "test" => Ok(Self::MerchantSimulator),
            _ => Err(SwishError::UnknownEnvironment(name.to_owned())),
        }
    }

    /// Canonical name of this environment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Production => "production",
            Self::MerchantSimulator => "mss",
        }
    }

    /// Base URL for the payment and refund endpoints.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Production => PRODUCTION_BASE_URL,
            Self::MerchantSimulator => MSS_BASE_URL,
        }
    }

    /// Base URL for the commerce QR-code generator.
    ///
    /// The QR generator has no simulator deployment; both environments point
    /// at the production generator.
    #[must_use]
    pub fn qr_url(self) -> &'static str {
        QR_BASE_URL
    }
}

impl FromStr for Environment {
    type Err = SwishError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
