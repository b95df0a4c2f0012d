//! # Checkout Provider Trait
//!
//! Seam between the request handler and the hosted-checkout provider.
//! The handler only sees this trait; the Stripe implementation lives in
//! the `cart-stripe` crate, and tests substitute their own.

use crate::cart::Cart;
use crate::error::CheckoutResult;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A hosted checkout session created by the payment provider.
///
/// The session is owned by the provider: this service relays the id to the
/// caller and never persists any of it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Provider's opaque session ID
    pub id: String,

    /// Hosted payment page URL
    pub url: String,

    /// When the session expires, if the provider says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Core trait for hosted-checkout providers.
#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session for a validated cart.
    ///
    /// Exactly one outbound call per invocation; no retries. Empty carts
    /// are rejected with a `Validation` error before any call goes out.
    async fn create_session(
        &self,
        cart: &Cart,
        urls: &RedirectUrls,
    ) -> CheckoutResult<CheckoutSession>;

    /// Provider name, for logging
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a shared provider (dynamic dispatch)
pub type BoxedCheckoutProvider = Arc<dyn CheckoutProvider>;

/// Redirect URLs handed to the provider with every session.
///
/// Deployment configuration, never request-scoped.
#[derive(Debug, Clone)]
pub struct RedirectUrls {
    /// URL to redirect after successful payment
    pub success_url: String,
    /// URL to redirect if the customer cancels
    pub cancel_url: String,
}

impl RedirectUrls {
    pub fn new(success_url: impl Into<String>, cancel_url: impl Into<String>) -> Self {
        Self {
            success_url: success_url.into(),
            cancel_url: cancel_url.into(),
        }
    }

    /// Build from a base URL with the default paths.
    /// `/success` and `/cart` match the pages the storefront serves.
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            success_url: format!("{base}/success"),
            cancel_url: format!("{base}/cart"),
        }
    }
}

impl Default for RedirectUrls {
    fn default() -> Self {
        Self::from_base("http://localhost:8080")
    }
}
