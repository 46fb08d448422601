//! Order HTTP handlers
//!
//! Every mutation goes through `OrderService`, which reprices the order
//! before it is stored.

use super::model::{AddItemsRequest, CreateOrderRequest, Order, SetAdjustmentRequest};
use crate::core::validation::Validated;
use crate::core::{CheckoutResult, EntityId, OrderItemIds};
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_orders(State(state): State<AppState>) -> CheckoutResult<Json<Value>> {
    let orders = state.store.orders.list().await?;
    Ok(Json(json!({
        "orders": orders,
        "count": orders.len()
    })))
}

pub async fn get_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Order>> {
    Ok(Json(state.store.order(id).await?))
}

pub async fn create_order(
    State(state): State<AppState>,
    Validated(payload): Validated<CreateOrderRequest>,
) -> CheckoutResult<(StatusCode, Json<Order>)> {
    let priced = state.orders.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(priced.order)))
}

pub async fn delete_order(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<StatusCode> {
    state.orders.delete_order(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_items(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Validated(payload): Validated<AddItemsRequest>,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.add_items(id, &payload.item_ids).await?;
    Ok(Json(priced.order))
}

pub async fn remove_item(
    State(state): State<AppState>,
    ids: OrderItemIds,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.remove_item(ids.order_id, ids.item_id).await?;
    Ok(Json(priced.order))
}

pub async fn clear_items(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.clear_items(id).await?;
    Ok(Json(priced.order))
}

pub async fn set_discount(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Validated(payload): Validated<SetAdjustmentRequest>,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.set_discount(id, payload.id).await?;
    Ok(Json(priced.order))
}

pub async fn set_tax(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Validated(payload): Validated<SetAdjustmentRequest>,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.set_tax(id, payload.id).await?;
    Ok(Json(priced.order))
}

/// Explicit recompute; a no-op write when the total is already current
pub async fn recompute_total(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Order>> {
    let priced = state.orders.recompute_and_persist(id).await?;
    Ok(Json(priced.order))
}
