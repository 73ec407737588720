//! Cubist compiles SVG vector geometry into cubic-Bezier subpaths.
//!
//! Whole documents and bare path-command strings both land in the same
//! representation: lists of [`Subpath`]s carrying resolved fill and stroke
//! [`Style`]s, in a y-up coordinate frame. The surface is small:
//!
//! - [`compile_path`] / [`PathCompiler`] for path-command strings
//! - [`compile_document`] / [`DocumentWalker`] for whole documents
//! - [`DirCache`] to persist compiled geometry across runs
#![forbid(unsafe_code)]

pub mod assets;
pub mod cache;
pub mod document;
pub mod foundation;
pub mod path;
pub mod style;
pub mod transform;

pub use crate::assets::resolver::AssetResolver;
pub use crate::cache::store::{
    CacheKey, DirCache, GeometryStore, MemoryCache, compile_path_cached,
};
pub use crate::document::registry::{Definition, DefinitionRegistry};
pub use crate::document::walker::{DocumentWalker, WalkOptions, compile_document};
pub use crate::foundation::core::{
    Affine, CubicBez, Geometry, GeometryNode, Paint, Point, Rgba, Style, Subpath, Vec2,
};
pub use crate::foundation::error::{CubistError, CubistResult};
pub use crate::path::compiler::{CompileStats, PathCompiler, PathOptions, compile_path};
pub use crate::style::cascade::{StyleAttrs, StyleDefaults};
pub use crate::style::color::{parse_color, parse_paint};
pub use crate::transform::compose::{TransformOp, compose_element_transform, parse_transform};
