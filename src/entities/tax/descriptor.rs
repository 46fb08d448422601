//! Entity descriptor for Tax

use super::handlers::{create_tax, delete_tax, get_tax, list_taxes};
use crate::server::{AppState, EntityDescriptor};
use axum::{Router, routing::get};

/// Descriptor for the Tax entity
pub struct TaxDescriptor {
    pub state: AppState,
}

impl TaxDescriptor {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl EntityDescriptor for TaxDescriptor {
    fn entity_type(&self) -> &str {
        "tax"
    }

    fn plural(&self) -> &str {
        "taxes"
    }

    fn build_routes(&self) -> Router {
        Router::new()
            .route("/taxes", get(list_taxes).post(create_tax))
            .route("/taxes/{id}", get(get_tax).delete(delete_tax))
            .with_state(self.state.clone())
    }
}
