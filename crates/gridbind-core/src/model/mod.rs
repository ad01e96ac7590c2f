//! The reactive grid model.
//!
//! - [`TableModel`] - value store, change bus, and binding manager
//! - [`ModelOptions`], [`ValueParser`] - configuration surface
//! - [`ValueCache`] - the sparse resolved-value cache

mod bus;
mod options;
mod ops;
mod state;

pub use options::{ModelOptions, ValueParser};
pub use state::{TableModel, ValueCache};
