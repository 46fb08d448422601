//! Tax HTTP handlers

use super::model::{CreateTaxRequest, Tax};
use crate::core::validation::Validated;
use crate::core::{CheckoutResult, EntityId};
use crate::server::AppState;
use axum::{extract::State, http::StatusCode, response::Json};
use serde_json::{Value, json};

pub async fn list_taxes(State(state): State<AppState>) -> CheckoutResult<Json<Value>> {
    let taxes = state.store.taxes.list().await?;
    Ok(Json(json!({
        "taxes": taxes,
        "count": taxes.len()
    })))
}

pub async fn get_tax(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<Json<Tax>> {
    Ok(Json(state.store.tax(id).await?))
}

/// Store the tax, then provision its tax rate
pub async fn create_tax(
    State(state): State<AppState>,
    Validated(payload): Validated<CreateTaxRequest>,
) -> CheckoutResult<(StatusCode, Json<Tax>)> {
    let tax = state.store.taxes.create(payload.into_tax()).await?;
    tracing::info!(tax_id = %tax.id, percent = %tax.percent, "Tax created");

    state.provisioner.ensure_tax_rate(tax.id).await?;
    let tax = state.store.tax(tax.id).await?;
    Ok((StatusCode::CREATED, Json(tax)))
}

pub async fn delete_tax(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> CheckoutResult<StatusCode> {
    state.orders.delete_tax(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
