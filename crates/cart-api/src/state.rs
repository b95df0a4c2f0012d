//! # Application State
//!
//! Shared state for the Axum application: the checkout provider, redirect
//! URLs, and server configuration. Everything is constructed once at
//! startup and injected into handlers; there is no process-wide mutable
//! configuration.

use cart_core::{BoxedCheckoutProvider, Currency, RedirectUrls};
use cart_stripe::StripeCheckoutProvider;
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Base URL the storefront is served from (redirect-URL defaults)
    pub base_url: String,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Deployment currency for all line items
    pub currency: Currency,
    /// Explicit success-redirect override
    pub success_url: Option<String>,
    /// Explicit cancel-redirect override
    pub cancel_url: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let currency_code =
            std::env::var("CHECKOUT_CURRENCY").unwrap_or_else(|_| "usd".to_string());
        let currency = Currency::from_code(&currency_code).ok_or_else(|| {
            anyhow::anyhow!("CHECKOUT_CURRENCY is not a supported currency: {currency_code}")
        })?;

        Ok(Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            base_url: std::env::var("BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            currency,
            success_url: std::env::var("CHECKOUT_SUCCESS_URL").ok(),
            cancel_url: std::env::var("CHECKOUT_CANCEL_URL").ok(),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Resolve the redirect URLs: explicit overrides win, otherwise the
    /// base URL with the default paths (development defaults).
    pub fn redirect_urls(&self) -> RedirectUrls {
        let defaults = RedirectUrls::from_base(&self.base_url);
        RedirectUrls::new(
            self.success_url.clone().unwrap_or(defaults.success_url),
            self.cancel_url.clone().unwrap_or(defaults.cancel_url),
        )
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Checkout provider
    pub provider: BoxedCheckoutProvider,
    /// Redirect URLs handed to the provider
    pub urls: RedirectUrls,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create the production state: Stripe provider from environment.
    /// Fails fast on missing or malformed configuration.
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let urls = config.redirect_urls();

        let provider = StripeCheckoutProvider::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_provider(Arc::new(provider), urls, config))
    }

    /// Create state with an explicit provider (dependency injection,
    /// used by tests)
    pub fn with_provider(
        provider: BoxedCheckoutProvider,
        urls: RedirectUrls,
        config: AppConfig,
    ) -> Self {
        Self {
            provider,
            urls,
            config,
        }
    }
}
