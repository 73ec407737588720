//! Parsing and composition of SVG `transform` attributes.

pub mod compose;
