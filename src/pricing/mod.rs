//! Pricing: order totals and the services that keep them current

pub mod engine;
pub mod service;

pub use engine::{apply_discount, apply_tax, compute_total, ensure_single_currency, subtotal};
pub use service::{OrderService, PricedOrder};
