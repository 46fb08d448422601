//! # checkout-rs
//!
//! A small e-commerce checkout backend: catalog items are bundled into
//! orders, optionally discounted and taxed, and paid for through a payment
//! gateway using either a hosted checkout session or an embedded payment
//! intent.
//!
//! ## Pricing
//!
//! Item prices are normalized into USD (EUR at a fixed 1.08), summed, then
//! the discount is applied, then the tax on the discounted amount. Orders
//! whose items are priced in different currencies are rejected.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use checkout::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_config(CheckoutConfig::load(None)?)
//!     .build()?;
//! ```

pub mod checkout;
pub mod config;
pub mod core;
pub mod entities;
pub mod gateway;
pub mod pricing;
pub mod server;
pub mod storage;
pub mod store;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        CheckoutError, CheckoutResult, Currency, DataService, Entity, EntityId,
        validation::Validated,
    };

    // === Entities ===
    pub use crate::entities::{Discount, Item, Order, Tax};
    pub use crate::impl_entity;

    // === Services ===
    pub use crate::checkout::CheckoutService;
    pub use crate::pricing::{OrderService, PricedOrder, compute_total};
    pub use crate::store::EntityStore;

    // === Gateway ===
    pub use crate::gateway::{MockGateway, PaymentGateway, Provisioner, StripeGateway};

    // === Storage ===
    pub use crate::storage::InMemoryDataService;

    // === Config ===
    pub use crate::config::{CheckoutConfig, GatewayConfig, KeyPair};

    // === Server ===
    pub use crate::server::{AppState, EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use rust_decimal::Decimal;
    pub use uuid::Uuid;
}
