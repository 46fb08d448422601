//! Discount HTTP handlers

use super::model::{CreateDiscountRequest, Discount};
use crate::core::validation::Validated;
use crate::core::{CheckoutResult, EntityId};
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_discounts(State(state): State<AppState>) -> CheckoutResult<Json<Value>> {
    let discounts = state.store.discounts.list().await?;
    Ok(Json(json!({
        "discounts": discounts,
        "count": discounts.len()
    })))
}

pub async fn get_discount(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Discount>> {
    Ok(Json(state.store.discount(id).await?))
}

/// Store the discount, then provision its coupon
pub async fn create_discount(
    State(state): State<AppState>,
    Validated(payload): Validated<CreateDiscountRequest>,
) -> CheckoutResult<(StatusCode, Json<Discount>)> {
    let discount = state.store.discounts.create(payload.into_discount()).await?;
    tracing::info!(discount_id = %discount.id, percent = %discount.percent, "Discount created");

    state.provisioner.ensure_coupon(discount.id).await?;
    let discount = state.store.discount(discount.id).await?;
    Ok((StatusCode::CREATED, Json(discount)))
}

pub async fn delete_discount(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<StatusCode> {
    state.orders.delete_discount(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
