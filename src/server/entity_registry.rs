//! Entity registry for managing entity descriptors and their routes

use axum::Router;
use std::collections::BTreeMap;

/// Trait that describes how to build routes for an entity
///
/// Each entity (Item, Discount, Tax, Order) implements this trait to
/// provide its administration routes.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "item")
    fn entity_type(&self) -> &str;

    /// The plural form, also the route prefix (e.g., "items")
    fn plural(&self) -> &str;

    /// Build the routes for this entity, with state already applied
    fn build_routes(&self) -> Router;
}

/// Registry for all entities exposed by the server
///
/// Descriptors are kept sorted by entity type so routes merge in a stable
/// order.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: BTreeMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: BTreeMap::new(),
        }
    }

    /// Register an entity descriptor, replacing any with the same type
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self) -> Router {
        self.descriptors
            .values()
            .fold(Router::new(), |router, descriptor| {
                router.merge(descriptor.build_routes())
            })
    }

    /// Get all registered entity types, sorted
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }

    /// Route prefixes of all registered entities
    pub fn route_prefixes(&self) -> Vec<String> {
        self.descriptors
            .values()
            .map(|d| format!("/{}", d.plural()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CheckoutConfig;
    use crate::entities::{discount::DiscountDescriptor, item::ItemDescriptor};
    use crate::gateway::MockGateway;
    use crate::server::AppState;
    use crate::store::EntityStore;
    use std::sync::Arc;

    fn state() -> AppState {
        AppState::new(
            CheckoutConfig::default(),
            EntityStore::in_memory(),
            Arc::new(MockGateway::new()),
        )
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.entity_types().is_empty());
        assert!(registry.route_prefixes().is_empty());
    }

    #[test]
    fn test_register_is_sorted() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(ItemDescriptor::new(state())));
        registry.register(Box::new(DiscountDescriptor::new(state())));

        assert_eq!(registry.entity_types(), vec!["discount", "item"]);
        assert_eq!(registry.route_prefixes(), vec!["/discounts", "/items"]);
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(ItemDescriptor::new(state())));
        registry.register(Box::new(ItemDescriptor::new(state())));
        assert_eq!(registry.entity_types().len(), 1);
    }

    #[test]
    fn test_build_routes_with_entities() {
        let mut registry = EntityRegistry::new();
        registry.register(Box::new(ItemDescriptor::new(state())));
        registry.register(Box::new(DiscountDescriptor::new(state())));
        let _router = registry.build_routes();
    }
}
