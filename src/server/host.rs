//! Server host holding the application state
//!
//! `ServerHost` is transport-agnostic: it owns the services and the entity
//! registry, and exposures (currently REST) turn it into routes.

use crate::checkout::CheckoutService;
use crate::config::CheckoutConfig;
use crate::gateway::{PaymentGateway, Provisioner};
use crate::pricing::OrderService;
use crate::server::entity_registry::EntityRegistry;
use crate::store::EntityStore;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<CheckoutConfig>,
    pub store: EntityStore,
    pub orders: OrderService,
    pub provisioner: Provisioner,
    pub checkout: CheckoutService,
}

impl AppState {
    /// Wire the services on top of a store and a gateway
    pub fn new(
        config: CheckoutConfig,
        store: EntityStore,
        gateway: Arc<dyn PaymentGateway>,
    ) -> Self {
        let config = Arc::new(config);
        let orders = OrderService::new(store.clone());
        let provisioner = Provisioner::new(gateway, store.clone());
        let checkout = CheckoutService::new(
            store.clone(),
            orders.clone(),
            provisioner.clone(),
            config.clone(),
        );

        Self {
            config,
            store,
            orders,
            provisioner,
            checkout,
        }
    }
}

/// Host context containing all server state
///
/// # Example
///
/// ```rust,ignore
/// let state = AppState::new(config, EntityStore::in_memory(), gateway);
/// let host = Arc::new(ServerHost::new(state, registry));
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    pub state: AppState,

    /// Entity registry for CRUD routes
    pub entity_registry: EntityRegistry,
}

impl ServerHost {
    pub fn new(state: AppState, entity_registry: EntityRegistry) -> Self {
        Self {
            state,
            entity_registry,
        }
    }

    /// Get entity types registered in the host
    pub fn entity_types(&self) -> Vec<&str> {
        self.entity_registry.entity_types()
    }

    pub fn config(&self) -> &CheckoutConfig {
        &self.state.config
    }
}
