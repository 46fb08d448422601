//! Entity descriptor for Discount

use super::handlers::{create_discount, delete_discount, get_discount, list_discounts};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Discount entity
pub struct DiscountDescriptor {
    pub state: AppState,
}

impl DiscountDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for DiscountDescriptor {
    fn entity_type(&self) -> &str {
        "discount"
    }

    fn plural(&self) -> &str {
        "discounts"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/discounts", get(list_discounts).post(create_discount))
            .route("/discounts/{id}", get(get_discount).delete(delete_discount))
            .with_state(self.state.clone())
    }
}
