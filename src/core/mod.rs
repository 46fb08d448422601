//! Core module containing fundamental traits and types for the checkout backend

pub mod entity;
pub mod error;
pub mod extractors;
pub mod money;
pub mod service;
pub mod validation;

pub use entity::Entity;
pub use error::{CheckoutError, CheckoutResult};
pub use extractors::{EntityId, OrderItemIds};
pub use money::Currency;
pub use service::DataService;
