//! # Stripe Configuration
//!
//! Configuration management for the Stripe integration.
//! All secrets are loaded from environment variables.

use cart_core::CheckoutError;
use std::env;
use std::time::Duration;

/// Default request timeout for Stripe API calls
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...)
    pub secret_key: String,

    /// Payment method types offered at checkout (e.g. ["card"])
    pub payment_method_types: Vec<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,

    /// Per-request timeout for calls to Stripe
    pub request_timeout: Duration,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `STRIPE_SECRET_KEY`
    ///
    /// Optional:
    /// - `STRIPE_PAYMENT_METHOD_TYPES` (comma-separated, default "card")
    pub fn from_env() -> Result<Self, CheckoutError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let secret_key = env::var("STRIPE_SECRET_KEY").map_err(|_| {
            CheckoutError::Configuration("STRIPE_SECRET_KEY not set".to_string())
        })?;

        // Validate key format
        if !secret_key.starts_with("sk_test_") && !secret_key.starts_with("sk_live_") {
            return Err(CheckoutError::Configuration(
                "STRIPE_SECRET_KEY must start with sk_test_ or sk_live_".to_string(),
            ));
        }

        let payment_method_types = env::var("STRIPE_PAYMENT_METHOD_TYPES")
            .unwrap_or_else(|_| "card".to_string())
            .split(',')
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();

        if payment_method_types.is_empty() {
            return Err(CheckoutError::Configuration(
                "STRIPE_PAYMENT_METHOD_TYPES must name at least one payment method".to_string(),
            ));
        }

        Ok(Self {
            secret_key,
            payment_method_types,
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            payment_method_types: vec!["card".to_string()],
            api_base_url: "https://api.stripe.com".to_string(),
            api_version: "2024-12-18.acacia".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key.starts_with("sk_test_")
    }

    /// Check if using live keys
    pub fn is_live_mode(&self) -> bool {
        self.secret_key.starts_with("sk_live_")
    }

    /// Get authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.secret_key)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set payment method types
    pub fn with_payment_method_types(mut self, types: Vec<String>) -> Self {
        self.payment_method_types = types;
        self
    }

    /// Builder: set the per-request timeout (for testing)
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
