//! ServerBuilder for fluent API to build the HTTP server

use super::entity_registry::{EntityDescriptor, EntityRegistry};
use super::exposure::RestExposure;
use super::host::{AppState, ServerHost};
use crate::config::CheckoutConfig;
use crate::entities::{
    discount::DiscountDescriptor, item::ItemDescriptor, order::OrderDescriptor,
    tax::TaxDescriptor,
};
use crate::gateway::{PaymentGateway, StripeGateway};
use crate::store::EntityStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the checkout server
///
/// Every component has a default: configuration from
/// `CheckoutConfig::default()`, in-memory storage, and a Stripe gateway
/// built from the configuration.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(CheckoutConfig::load(None)?)
///     .with_gateway(MockGateway::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: Option<CheckoutConfig>,
    store: Option<EntityStore>,
    gateway: Option<Arc<dyn PaymentGateway>>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            config: None,
            store: None,
            gateway: None,
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: CheckoutConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a specific store (in-memory by default)
    pub fn with_store(mut self, store: EntityStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Use a specific payment gateway (Stripe by default)
    pub fn with_gateway(mut self, gateway: impl PaymentGateway + 'static) -> Self {
        self.gateway = Some(Arc::new(gateway));
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes outside the entity and checkout APIs, such as
    /// webhooks or static checkout pages.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let config = self.config.take().unwrap_or_default();
        let store = self.store.take().unwrap_or_default();
        let gateway = match self.gateway.take() {
            Some(gateway) => gateway,
            None => {
                tracing::debug!(api_base = %config.gateway.api_base, "Using Stripe gateway");
                Arc::new(StripeGateway::new(&config.gateway))
            }
        };

        let state = AppState::new(config, store, gateway);

        let mut entity_registry = EntityRegistry::new();
        let descriptors: Vec<Box<dyn EntityDescriptor>> = vec![
            Box::new(ItemDescriptor::new(state.clone())),
            Box::new(DiscountDescriptor::new(state.clone())),
            Box::new(TaxDescriptor::new(state.clone())),
            Box::new(OrderDescriptor::new(state.clone())),
        ];
        for descriptor in descriptors {
            entity_registry.register(descriptor);
        }
        tracing::debug!(routes = ?entity_registry.route_prefixes(), "Entity routes registered");

        Ok(ServerHost::new(state, entity_registry))
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        let custom_routes = std::mem::take(&mut self.custom_routes);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
