//! Checkout HTTP handlers

use super::service::{ItemCheckoutView, OrderCheckoutView};
use crate::core::{CheckoutResult, EntityId};
use crate::server::AppState;
use axum::{extract::State, response::Json};
use serde_json::{Value, json};

pub async fn item_checkout(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<ItemCheckoutView>> {
    Ok(Json(state.checkout.item_view(id).await?))
}

pub async fn create_item_session(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Value>> {
    let session = state.checkout.item_session(id).await?;
    Ok(Json(json!({
        "session_id": session.id,
        "url": session.url
    })))
}

pub async fn create_item_payment_intent(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Value>> {
    let intent = state.checkout.item_payment_intent(id).await?;
    Ok(Json(json!({ "client_secret": intent.client_secret })))
}

pub async fn order_checkout(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<OrderCheckoutView>> {
    Ok(Json(state.checkout.order_view(id).await?))
}

pub async fn create_order_session(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Value>> {
    let session = state.checkout.order_session(id).await?;
    Ok(Json(json!({
        "session_id": session.id,
        "url": session.url
    })))
}

pub async fn create_order_payment_intent(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Value>> {
    let intent = state.checkout.order_payment_intent(id).await?;
    Ok(Json(json!({ "client_secret": intent.client_secret })))
}
