//! SVG document ingestion: element dispatch, definition reuse, shape
//! synthesis.

pub mod registry;
pub(crate) mod shapes;
pub mod walker;
