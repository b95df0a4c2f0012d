//! # cart-core
//!
//! Core types and traits for the cartflow checkout service.
//!
//! This crate provides:
//! - `CartItem`, `LineItem`, and `Cart` for cart validation and transformation
//! - `CheckoutProvider` trait for hosted-checkout providers
//! - `CheckoutSession` and `RedirectUrls` for the provider contract
//! - `CheckoutError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use cart_core::{Cart, CartItem, Currency, CheckoutProvider, RedirectUrls};
//!
//! // Validate the request into a cart (rejects empty carts and bad entries)
//! let cart = Cart::from_items(&request.items, Currency::USD)?;
//!
//! // Create a hosted checkout session using a provider
//! let session = provider.create_session(&cart, &urls).await?;
//!
//! // Relay session.id to the caller
//! ```

pub mod cart;
pub mod error;
pub mod provider;

// Re-exports for convenience
pub use cart::{Cart, CartItem, Currency, LineItem, Price};
pub use error::{CheckoutError, CheckoutResult};
pub use provider::{BoxedCheckoutProvider, CheckoutProvider, CheckoutSession, RedirectUrls};
