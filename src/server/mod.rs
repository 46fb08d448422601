//! Server module for building the checkout HTTP server
//!
//! `ServerBuilder` wires configuration, storage and the payment gateway
//! into an [`AppState`], registers the entity descriptors and exposes
//! everything over REST.

pub mod builder;
pub mod entity_registry;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use entity_registry::{EntityDescriptor, EntityRegistry};
pub use exposure::RestExposure;
pub use host::{AppState, ServerHost};
