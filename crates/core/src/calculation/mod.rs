//! Line-item calculation.
//!
//! Computes subtotal, tax and grand total for the line items of a document.
//!
//! # Modules
//!
//! - `types` - Raw and computed line items, calculation result
//! - `error` - Line-item validation errors
//! - `service` - The calculator itself

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CalculationError;
pub use service::LineItemCalculator;
pub use types::{CalculationResult, LineItem, RawLineItem};
