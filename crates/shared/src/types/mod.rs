//! Common types used across the application.

pub mod id;
pub mod money;

pub use id::*;
pub use money::{AMOUNT_DECIMAL_PLACES, fits_amount_scale, percent_of, round_amount};
