//! Shared primitives: geometry data model, numeric helpers, error taxonomy.

pub mod core;
pub mod error;
pub(crate) mod math;
