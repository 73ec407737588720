//! The path-command compiler: SVG path mini-language strings to cubic
//! subpaths.

pub mod compiler;
pub(crate) mod lexer;
