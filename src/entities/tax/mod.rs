//! Tax entity module

pub mod descriptor;
pub mod handlers;
pub mod model;

pub use descriptor::TaxDescriptor;
pub use model::{CreateTaxRequest, Tax};
