//! # cart-api
//!
//! HTTP API layer for the cartflow checkout service.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - The checkout-session endpoint
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/create-checkout-session` | Create a hosted checkout session |

pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
