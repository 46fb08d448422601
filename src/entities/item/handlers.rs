//! Item HTTP handlers

use super::model::{CreateItemRequest, Item, UpdateItemRequest};
use crate::core::validation::Validated;
use crate::core::{CheckoutResult, EntityId};
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_items(State(state): State<AppState>) -> CheckoutResult<Json<Value>> {
    let items = state.store.items.list().await?;
    Ok(Json(json!({
        "items": items,
        "count": items.len()
    })))
}

pub async fn get_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Item>> {
    Ok(Json(state.store.item(id).await?))
}

pub async fn create_item(
    State(state): State<AppState>,
    Validated(payload): Validated<CreateItemRequest>,
) -> CheckoutResult<(StatusCode, Json<Item>)> {
    let item = state.store.items.create(payload.into_item()).await?;
    tracing::info!(item_id = %item.id, currency = %item.currency, "Item created");
    Ok((StatusCode::CREATED, Json(item)))
}

pub async fn update_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    Validated(payload): Validated<UpdateItemRequest>,
) -> CheckoutResult<Json<Item>> {
    let mut item = state.store.item(id).await?;
    if payload.apply(&mut item) {
        tracing::debug!(item_id = %id, "Item repriced");
    }
    Ok(Json(state.orders.update_item(item).await?))
}

pub async fn delete_item(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<StatusCode> {
    state.orders.delete_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
