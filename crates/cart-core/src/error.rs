//! # Checkout Error Types
//!
//! Typed error handling for the cartflow checkout service.
//! All checkout operations return `Result<T, CheckoutError>`.

use thiserror::Error;

/// Core error type for all checkout operations
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Configuration errors (missing keys, invalid config).
    /// Fatal at startup, never produced per-request.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid cart data, rejected before any provider call
    #[error("Invalid cart: {0}")]
    Validation(String),

    /// Payment provider rejected the request
    #[error("Provider error [{provider}]: {message}")]
    Provider { provider: String, message: String },

    /// Network/HTTP error communicating with the provider
    #[error("Network error: {0}")]
    Network(String),

    /// Provider call exceeded the request timeout
    #[error("Provider timeout: {0}")]
    Timeout(String),

    /// Provider response could not be parsed
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CheckoutError {
    /// Returns the HTTP status code appropriate for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CheckoutError::Configuration(_) => 500,
            CheckoutError::Validation(_) => 400,
            CheckoutError::Provider { .. } => 502,
            CheckoutError::Network(_) => 502,
            CheckoutError::Timeout(_) => 504,
            CheckoutError::Serialization(_) => 502,
        }
    }

    /// Returns the message safe to put in a response body.
    ///
    /// Validation reasons are surfaced verbatim so the caller can fix the
    /// request. Everything upstream collapses to a generic message: provider
    /// error bodies and transport errors stay in the server logs.
    pub fn public_message(&self) -> String {
        match self {
            CheckoutError::Validation(reason) => reason.clone(),
            CheckoutError::Configuration(_) => "service is misconfigured".to_string(),
            CheckoutError::Provider { .. } | CheckoutError::Network(_) => {
                "payment provider request failed".to_string()
            }
            CheckoutError::Timeout(_) => "payment provider request timed out".to_string(),
            CheckoutError::Serialization(_) => {
                "payment provider returned an unexpected response".to_string()
            }
        }
    }
}

/// Result type alias for checkout operations
pub type CheckoutResult<T> = Result<T, CheckoutError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            CheckoutError::Validation("items must not be empty".into()).status_code(),
            400
        );
        assert_eq!(
            CheckoutError::Provider {
                provider: "stripe".into(),
                message: "card declined".into()
            }
            .status_code(),
            502
        );
        assert_eq!(CheckoutError::Network("reset".into()).status_code(), 502);
        assert_eq!(CheckoutError::Timeout("30s".into()).status_code(), 504);
        assert_eq!(
            CheckoutError::Configuration("missing key".into()).status_code(),
            500
        );
    }

    #[test]
    fn test_validation_reason_is_public() {
        let err = CheckoutError::Validation("items[0].qty must be greater than zero".into());
        assert_eq!(err.public_message(), "items[0].qty must be greater than zero");
    }

    #[test]
    fn test_public_message_hides_provider_detail() {
        let err = CheckoutError::Provider {
            provider: "stripe".into(),
            message: "Invalid API Key provided: sk_test_abc".into(),
        };
        assert!(!err.public_message().contains("sk_test"));
        assert_eq!(err.public_message(), "payment provider request failed");
    }

    #[test]
    fn test_timeout_is_gateway_timeout() {
        let err = CheckoutError::Timeout("deadline elapsed".into());
        assert_eq!(err.status_code(), 504);
        assert_eq!(err.public_message(), "payment provider request timed out");
    }
}
