//! Locating SVG documents on disk.

pub mod resolver;
