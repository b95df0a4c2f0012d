//! # Stripe Checkout Sessions
//!
//! Implementation of the Stripe Checkout Sessions API.
//! Stripe hosts the payment page; this client only creates the session.

use crate::config::StripeConfig;
use async_trait::async_trait;
use cart_core::{
    Cart, CheckoutError, CheckoutProvider, CheckoutResult, CheckoutSession, RedirectUrls,
};
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, info, instrument};

/// Checkout sessions are one-time payments; subscriptions are not offered.
const CHECKOUT_MODE: &str = "payment";

/// Stripe hosted-checkout provider
///
/// Uses Stripe's hosted checkout page for secure payments.
/// This is the recommended approach for PCI compliance.
pub struct StripeCheckoutProvider {
    config: StripeConfig,
    client: Client,
}

impl StripeCheckoutProvider {
    /// Create a new Stripe checkout provider
    pub fn new(config: StripeConfig) -> Self {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Create from environment variables
    pub fn from_env() -> CheckoutResult<Self> {
        let config = StripeConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Build form data for the Stripe API.
    ///
    /// Stripe's form encoding addresses nested fields with bracketed keys,
    /// one pair per leaf value.
    fn build_form_params(&self, cart: &Cart, urls: &RedirectUrls) -> Vec<(String, String)> {
        let mut form_params: Vec<(String, String)> = vec![
            ("mode".to_string(), CHECKOUT_MODE.to_string()),
            ("success_url".to_string(), urls.success_url.clone()),
            ("cancel_url".to_string(), urls.cancel_url.clone()),
        ];

        for (i, method) in self.config.payment_method_types.iter().enumerate() {
            form_params.push((format!("payment_method_types[{}]", i), method.clone()));
        }

        for (i, item) in cart.line_items.iter().enumerate() {
            form_params.push((
                format!("line_items[{}][price_data][currency]", i),
                item.unit_price.currency.as_str().to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][unit_amount]", i),
                item.unit_price.amount.to_string(),
            ));
            form_params.push((
                format!("line_items[{}][price_data][product_data][name]", i),
                item.name.clone(),
            ));
            form_params.push((
                format!("line_items[{}][quantity]", i),
                item.quantity.to_string(),
            ));
        }

        form_params
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckoutProvider {
    #[instrument(skip(self, cart, urls), fields(cart_id = %cart.id))]
    async fn create_session(
        &self,
        cart: &Cart,
        urls: &RedirectUrls,
    ) -> CheckoutResult<CheckoutSession> {
        if cart.is_empty() {
            return Err(CheckoutError::Validation(
                "items must be a non-empty array".to_string(),
            ));
        }

        let form_params = self.build_form_params(cart, urls);

        debug!(
            "Creating Stripe checkout session: {} line items, total={}",
            cart.line_items.len(),
            cart.total().amount
        );

        let url = format!("{}/v1/checkout/sessions", self.config.api_base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", self.config.auth_header())
            .header("Stripe-Version", &self.config.api_version)
            .form(&form_params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CheckoutError::Timeout(e.to_string())
                } else {
                    CheckoutError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CheckoutError::Network(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);

            // Parse the Stripe error envelope
            if let Ok(error_response) = serde_json::from_str::<StripeErrorResponse>(&body) {
                return Err(CheckoutError::Provider {
                    provider: "stripe".to_string(),
                    message: error_response.error.message,
                });
            }

            return Err(CheckoutError::Provider {
                provider: "stripe".to_string(),
                message: format!("HTTP {}: {}", status, body),
            });
        }

        let session_response: StripeCheckoutSessionResponse =
            serde_json::from_str(&body).map_err(|e| {
                CheckoutError::Serialization(format!("Failed to parse Stripe response: {}", e))
            })?;

        info!(
            "Created Stripe checkout session: id={}, url={}",
            session_response.id, session_response.url
        );

        let expires_at = session_response
            .expires_at
            .and_then(|ts| DateTime::from_timestamp(ts, 0));

        Ok(CheckoutSession {
            id: session_response.id,
            url: session_response.url,
            expires_at,
        })
    }

    fn provider_name(&self) -> &'static str {
        "stripe"
    }
}

// =============================================================================
// Stripe API Types
// =============================================================================

#[derive(Debug, Deserialize)]
struct StripeCheckoutSessionResponse {
    id: String,
    url: String,
    #[serde(default)]
    expires_at: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    message: String,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    param: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use cart_core::{CartItem, Currency};
    use serde_json::json;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_cart() -> Cart {
        let items = vec![
            CartItem {
                name: "Mug".to_string(),
                price: 9.5,
                qty: 3,
            },
            CartItem {
                name: "Shirt".to_string(),
                price: 19.99,
                qty: 2,
            },
        ];
        Cart::from_items(&items, Currency::USD).unwrap()
    }

    fn test_urls() -> RedirectUrls {
        RedirectUrls::new(
            "http://localhost:8080/success",
            "http://localhost:8080/cart",
        )
    }

    fn provider_for(server: &MockServer) -> StripeCheckoutProvider {
        let config = StripeConfig::new("sk_test_abc123").with_api_base_url(server.uri());
        StripeCheckoutProvider::new(config)
    }

    #[test]
    fn test_build_form_params() {
        let config = StripeConfig::new("sk_test_abc123");
        let provider = StripeCheckoutProvider::new(config);
        let params = provider.build_form_params(&test_cart(), &test_urls());

        let find = |key: &str| {
            params
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };

        assert_eq!(find("mode"), Some("payment"));
        assert_eq!(find("success_url"), Some("http://localhost:8080/success"));
        assert_eq!(find("cancel_url"), Some("http://localhost:8080/cart"));
        assert_eq!(find("payment_method_types[0]"), Some("card"));
        assert_eq!(find("line_items[0][price_data][currency]"), Some("usd"));
        assert_eq!(find("line_items[0][price_data][unit_amount]"), Some("950"));
        assert_eq!(
            find("line_items[0][price_data][product_data][name]"),
            Some("Mug")
        );
        assert_eq!(find("line_items[0][quantity]"), Some("3"));
        assert_eq!(find("line_items[1][price_data][unit_amount]"), Some("1999"));
        assert_eq!(find("line_items[1][quantity]"), Some("2"));
    }

    #[tokio::test]
    async fn test_create_session_success() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .and(header("Authorization", "Bearer sk_test_abc123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_a1b2c3",
                "url": "https://checkout.stripe.com/c/pay/cs_test_a1b2c3",
                "expires_at": 1_700_003_600
            })))
            .expect(1)
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let session = provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap();

        assert_eq!(session.id, "cs_test_a1b2c3");
        assert_eq!(session.url, "https://checkout.stripe.com/c/pay/cs_test_a1b2c3");
        assert!(session.expires_at.is_some());
    }

    #[tokio::test]
    async fn test_request_body_encodes_line_items() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cs_test_body",
                "url": "https://checkout.stripe.com/c/pay/cs_test_body"
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);

        // Undo the percent-encoding of the bracketed keys for readability
        let body = String::from_utf8(requests[0].body.clone())
            .unwrap()
            .replace("%5B", "[")
            .replace("%5D", "]");

        assert!(body.contains("mode=payment"));
        assert!(body.contains("payment_method_types[0]=card"));
        assert!(body.contains("line_items[0][price_data][currency]=usd"));
        assert!(body.contains("line_items[0][price_data][unit_amount]=950"));
        assert!(body.contains("line_items[0][price_data][product_data][name]=Mug"));
        assert!(body.contains("line_items[0][quantity]=3"));
        assert!(body.contains("line_items[1][price_data][unit_amount]=1999"));
        assert!(body.contains("line_items[1][quantity]=2"));
    }

    #[tokio::test]
    async fn test_stripe_error_envelope() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": {
                    "message": "Invalid currency: xyz",
                    "code": "parameter_invalid",
                    "param": "line_items[0][price_data][currency]"
                }
            })))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap_err();

        match err {
            CheckoutError::Provider { provider, message } => {
                assert_eq!(provider, "stripe");
                assert_eq!(message, "Invalid currency: xyz");
            }
            other => panic!("expected Provider error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_json_error_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Provider { .. }));
        assert_eq!(err.status_code(), 502);
    }

    #[tokio::test]
    async fn test_unparseable_success_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let provider = provider_for(&server);
        let err = provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Serialization(_)));
    }

    #[tokio::test]
    async fn test_timeout_maps_to_timeout_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/checkout/sessions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "cs_slow", "url": "https://x"}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let config = StripeConfig::new("sk_test_abc123")
            .with_api_base_url(server.uri())
            .with_request_timeout(Duration::from_millis(50));
        let provider = StripeCheckoutProvider::new(config);

        let err = provider
            .create_session(&test_cart(), &test_urls())
            .await
            .unwrap_err();

        assert!(matches!(err, CheckoutError::Timeout(_)));
        assert_eq!(err.status_code(), 504);
    }
}
