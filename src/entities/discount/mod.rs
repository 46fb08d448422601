//! Discount entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::DiscountDescriptor;
pub use model::{CreateDiscountRequest, Discount};
