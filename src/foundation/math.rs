use kurbo::{CubicBez, Point, Vec2};

/// Straight line from `a` to `b` as a cubic with controls at the third points.
pub(crate) fn line_cubic(a: Point, b: Point) -> CubicBez {
    let d = b - a;
    CubicBez::new(a, a + d * (1.0 / 3.0), a + d * (2.0 / 3.0), b)
}

/// Quadratic segment (start `a`, control `q`, end `b`) raised to a cubic.
pub(crate) fn quad_cubic(a: Point, q: Point, b: Point) -> CubicBez {
    let c1 = a + (q - a) * (2.0 / 3.0);
    let c2 = b + (q - b) * (2.0 / 3.0);
    CubicBez::new(a, c1, c2, b)
}

/// Return `true` when `a` and `b` are within `eps` on both axes.
pub(crate) fn points_close(a: Point, b: Point, eps: f64) -> bool {
    (a.x - b.x).abs() <= eps && (a.y - b.y).abs() <= eps
}

/// Unsigned angle between two direction vectors, in `0..=PI`.
///
/// Zero-length inputs produce an angle of zero.
pub(crate) fn turn_angle(a: Vec2, b: Vec2) -> f64 {
    if a.hypot2() == 0.0 || b.hypot2() == 0.0 {
        return 0.0;
    }
    let cross = a.x * b.y - a.y * b.x;
    let dot = a.x * b.x + a.y * b.y;
    cross.atan2(dot).abs()
}
