//! # CartFlow
//!
//! Hosted checkout session service.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export CHECKOUT_SUCCESS_URL=https://shop.example.com/success
//! export CHECKOUT_CANCEL_URL=https://shop.example.com/cart
//!
//! # Run the server
//! cartflow
//! ```

use cart_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Initialize application state; missing configuration is fatal here,
    // never per-request
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Currency: {}", state.config.currency);
    info!("Provider: {}", state.provider.provider_name());
    info!("Success URL: {}", state.urls.success_url);
    info!("Cancel URL: {}", state.urls.cancel_url);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🛒 CartFlow starting on http://{}", addr);

    if !is_prod {
        info!("💳 Checkout: POST http://{}/create-checkout-session", addr);
        info!("📝 Health: GET http://{}/health", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
