use crate::foundation::math::line_cubic;

pub use kurbo::{Affine, CubicBez, Point, Vec2};

/// 8-bit straight-alpha RGBA color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// A paint value for fill or stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Paint {
    /// No paint; the corresponding shape part is not drawn.
    None,
    /// Solid color.
    Color(Rgba),
}

/// Fully resolved paint/stroke properties attached to emitted geometry.
///
/// Produced by the style cascade; every field has a concrete value (unset
/// properties have already fallen back to inherited or default values).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Style {
    /// Interior paint.
    pub fill: Paint,
    /// Interior opacity in `0..=1`.
    pub fill_opacity: f64,
    /// Outline paint.
    pub stroke: Paint,
    /// Outline width in local units.
    pub stroke_width: f64,
    /// Outline opacity in `0..=1`.
    pub stroke_opacity: f64,
}

/// One connected run of cubic segments.
///
/// Consecutive segments share endpoints exactly: `segments[i].p3 ==
/// segments[i + 1].p0`. Closure is recorded explicitly, never inferred from
/// coincident endpoints.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Subpath {
    /// Segments in draw order.
    pub segments: Vec<CubicBez>,
    /// Whether the subpath was explicitly closed.
    pub closed: bool,
}

impl Subpath {
    /// Open subpath from a list of segments.
    pub fn open(segments: Vec<CubicBez>) -> Self {
        Self {
            segments,
            closed: false,
        }
    }

    /// Closed subpath from a list of segments.
    pub fn closed(segments: Vec<CubicBez>) -> Self {
        Self {
            segments,
            closed: true,
        }
    }

    /// Closed subpath tracing straight edges through `corners` in order.
    ///
    /// The closing edge back to the first corner is included.
    pub fn closed_polygon(corners: &[Point]) -> Self {
        let mut segments = Vec::with_capacity(corners.len());
        for pair in corners.windows(2) {
            segments.push(line_cubic(pair[0], pair[1]));
        }
        if corners.len() > 1 {
            segments.push(line_cubic(corners[corners.len() - 1], corners[0]));
        }
        Self::closed(segments)
    }

    /// First point of the subpath, if any segments exist.
    pub fn start(&self) -> Option<Point> {
        self.segments.first().map(|seg| seg.p0)
    }

    /// Final endpoint of the subpath, if any segments exist.
    pub fn end(&self) -> Option<Point> {
        self.segments.last().map(|seg| seg.p3)
    }

    /// Return `true` when the subpath has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Map every control point through `t`.
    pub fn apply_affine(&mut self, t: Affine) {
        for seg in &mut self.segments {
            seg.p0 = t * seg.p0;
            seg.p1 = t * seg.p1;
            seg.p2 = t * seg.p2;
            seg.p3 = t * seg.p3;
        }
    }
}

/// Styled, transformed subpath geometry produced for one shape element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Geometry {
    /// Subpaths in document order, already mapped into the output frame.
    pub subpaths: Vec<Subpath>,
    /// Resolved style for this shape.
    pub style: Style,
    /// Composition of every transform applied while unwinding the walk.
    pub transform: Affine,
}

impl Geometry {
    /// Geometry in local coordinates with no transform applied yet.
    pub fn new(subpaths: Vec<Subpath>, style: Style) -> Self {
        Self {
            subpaths,
            style,
            transform: Affine::IDENTITY,
        }
    }

    /// Map all subpath points through `t` and record it in `transform`.
    pub fn apply_affine(&mut self, t: Affine) {
        for subpath in &mut self.subpaths {
            subpath.apply_affine(t);
        }
        self.transform = t * self.transform;
    }
}

/// A node in the compiled geometry forest.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryNode {
    /// Shape geometry with its resolved style and composed transform.
    Leaf(Geometry),
    /// A preserved SVG group.
    Group {
        /// Child nodes in document order.
        children: Vec<GeometryNode>,
        /// The group's local transform, already applied to descendant points.
        transform: Affine,
    },
}

impl GeometryNode {
    /// Map every point in the subtree through `t`, updating recorded
    /// transforms along the way.
    pub fn apply_affine(&mut self, t: Affine) {
        match self {
            GeometryNode::Leaf(geometry) => geometry.apply_affine(t),
            GeometryNode::Group {
                children,
                transform,
            } => {
                for child in children {
                    child.apply_affine(t);
                }
                *transform = t * *transform;
            }
        }
    }

    /// Collect all leaf geometry reachable from this node, depth-first.
    pub fn leaves(&self) -> Vec<&Geometry> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                GeometryNode::Leaf(geometry) => out.push(geometry),
                GeometryNode::Group { children, .. } => {
                    for child in children.iter().rev() {
                        stack.push(child);
                    }
                }
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
