//! Entity descriptor for Order

use super::handlers::{
    add_items, clear_items, create_order, delete_order, get_order, list_orders,
    recompute_total, remove_item, set_discount, set_tax,
};
use crate::server::{AppState, EntityDescriptor};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Descriptor for the Order entity, including membership routes
pub struct OrderDescriptor {
    pub state: AppState,
}

impl OrderDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for OrderDescriptor {
    fn entity_type(&self) -> &str {
        "order"
    }

    fn plural(&self) -> &str {
        "orders"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/orders", get(list_orders).post(create_order))
            .route("/orders/{id}", get(get_order).delete(delete_order))
            .route("/orders/{id}/items", post(add_items).delete(clear_items))
            .route("/orders/{id}/items/{item_id}", delete(remove_item))
            .route("/orders/{id}/discount", put(set_discount))
            .route("/orders/{id}/tax", put(set_tax))
            .route("/orders/{id}/total", post(recompute_total))
            .with_state(self.state.clone())
    }
}
