//! Request validation
//!
//! Payload structs derive `validator::Validate`; handlers receive them through
//! the [`Validated`] extractor, so invalid input never reaches a service.

pub mod extractor;
pub mod validators;

pub use extractor::Validated;
