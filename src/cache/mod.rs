//! Content-addressed persistence for compiled path geometry.

pub mod store;
