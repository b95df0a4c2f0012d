//! # Request Handlers
//!
//! Axum request handlers for the checkout API.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use cart_core::{Cart, CartItem, CheckoutError};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Create checkout session request
#[derive(Debug, Deserialize)]
pub struct CreateCheckoutRequest {
    /// Items to purchase
    #[serde(default)]
    pub items: Vec<CartItem>,
}

/// Create checkout session response
#[derive(Debug, Serialize)]
pub struct CheckoutSessionResponse {
    /// Provider session ID, used by the client to open the hosted page
    pub id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Map a checkout error to its HTTP response. Only the public message goes
/// into the body; the caller is expected to have logged the full error.
fn checkout_error_to_response(err: &CheckoutError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::new(err.public_message())))
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "cartflow",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a hosted checkout session.
///
/// Validates the cart, creates a session with the payment provider, and
/// relays the session id. Validation failures never reach the provider.
#[instrument(skip(state, request), fields(items = request.items.len()))]
pub async fn create_checkout_session(
    State(state): State<AppState>,
    Json(request): Json<CreateCheckoutRequest>,
) -> Result<Json<CheckoutSessionResponse>, (StatusCode, Json<ErrorResponse>)> {
    let cart = Cart::from_items(&request.items, state.config.currency).map_err(|e| {
        info!("Rejected cart: {}", e);
        checkout_error_to_response(&e)
    })?;

    info!(
        "Creating checkout: cart={}, {} items, total={}",
        cart.id,
        cart.item_count(),
        cart.total().amount
    );

    let session = state
        .provider
        .create_session(&cart, &state.urls)
        .await
        .map_err(|e| {
            error!("Failed to create checkout session: {}", e);
            checkout_error_to_response(&e)
        })?;

    info!("Created checkout session: {}", session.id);

    Ok(Json(CheckoutSessionResponse { id: session.id }))
}
