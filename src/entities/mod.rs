//! Entities module - catalog records and the order aggregate

pub mod macros;

pub mod discount;
pub mod item;
pub mod order;
pub mod tax;

// Re-export models for convenience
pub use discount::Discount;
pub use item::Item;
pub use order::Order;
pub use tax::Tax;
