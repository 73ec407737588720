//! Style attribute parsing and the inheritance cascade.

pub mod cascade;
pub mod color;
