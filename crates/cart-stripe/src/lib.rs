//! # cart-stripe
//!
//! Stripe checkout provider for the cartflow checkout service.
//!
//! Implements `cart_core::CheckoutProvider` over Stripe's Checkout Sessions
//! API: the cart's line items are posted to `/v1/checkout/sessions` and the
//! hosted session id is returned. Stripe hosts the payment page itself, so
//! no card data ever touches this service.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cart_stripe::StripeCheckoutProvider;
//! use cart_core::{Cart, Currency, CheckoutProvider, RedirectUrls};
//!
//! // Create provider from environment (STRIPE_SECRET_KEY)
//! let provider = StripeCheckoutProvider::from_env()?;
//!
//! let cart = Cart::from_items(&items, Currency::USD)?;
//! let session = provider.create_session(&cart, &urls).await?;
//!
//! // Relay session.id to the caller
//! ```

pub mod config;
pub mod session;

// Re-exports
pub use config::StripeConfig;
pub use session::StripeCheckoutProvider;
