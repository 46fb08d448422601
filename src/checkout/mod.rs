//! Checkout flows: hosted sessions and embedded payment intents
//!
//! Routes:
//! - GET  /checkout/items/{id}
//! - POST /checkout/items/{id}/session
//! - POST /checkout/items/{id}/payment-intent
//! - GET  /checkout/orders/{id}
//! - POST /checkout/orders/{id}/session
//! - POST /checkout/orders/{id}/payment-intent

pub mod handlers;
pub mod service;

pub use service::{CheckoutService, ItemCheckoutView, OrderCheckoutView};

use crate::server::AppState;
use axum::{
    Router,
    routing::{get, post},
};
use handlers::*;

/// Build the checkout routes
pub fn build_checkout_routes(state: AppState) -> Router {
    Router::new()
        .route("/checkout/items/{id}", get(item_checkout))
        .route("/checkout/items/{id}/session", post(create_item_session))
        .route(
            "/checkout/items/{id}/payment-intent",
            post(create_item_payment_intent),
        )
        .route("/checkout/orders/{id}", get(order_checkout))
        .route("/checkout/orders/{id}/session", post(create_order_session))
        .route(
            "/checkout/orders/{id}/payment-intent",
            post(create_order_payment_intent),
        )
        .with_state(state)
}
