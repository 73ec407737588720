use crate::foundation::core::{CubicBez, Point, Subpath, Vec2};
use crate::foundation::error::{CubistError, CubistResult};
use crate::foundation::math::line_cubic;
use crate::path::lexer::lex_numbers;

/// Parses a numeric attribute value, tolerating a trailing unit suffix
/// ("24px", "50%").
pub(crate) fn parse_length(value: &str) -> CubistResult<f64> {
    let trimmed = value.trim();
    let parsed = trimmed.parse::<f64>().or_else(|_| {
        trimmed
            .trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%')
            .trim_end()
            .parse::<f64>()
    });
    match parsed {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(CubistError::numeric(format!("invalid length \"{value}\""))),
    }
}

/// Corner-radius attribute: missing, `""`, `"none"`, and `"0"` all mean no
/// rounding.
pub(crate) fn corner_radius(attr: Option<&str>) -> CubistResult<f64> {
    match attr {
        None => Ok(0.0),
        Some(value) => {
            let value = value.trim();
            if value.is_empty() || value.eq_ignore_ascii_case("none") || value == "0" {
                Ok(0.0)
            } else {
                parse_length(value)
            }
        }
    }
}

/// Rewrites a `points` attribute into the equivalent path-command string:
/// `M` before the first pair, `L` before each subsequent pair, and a
/// trailing `Z` when `close` is set.
pub(crate) fn points_to_path_string(points: &str, close: bool) -> CubistResult<String> {
    let nums = lex_numbers(points)?;
    if nums.is_empty() {
        return Ok(String::new());
    }
    if nums.len() % 2 != 0 {
        return Err(CubistError::numeric(format!(
            "points attribute has an odd number of coordinates ({})",
            nums.len()
        )));
    }

    let mut parts = Vec::with_capacity(nums.len() / 2 + 1);
    for (i, pair) in nums.chunks_exact(2).enumerate() {
        let lead = if i == 0 { 'M' } else { 'L' };
        parts.push(format!("{lead}{},{}", pair[0], pair[1]));
    }
    if close {
        parts.push("Z".to_owned());
    }
    Ok(parts.join(" "))
}

/// Axis-aligned rectangle of the given size, centered on the origin,
/// traced counterclockwise from the top-right corner.
pub(crate) fn rect_subpath(width: f64, height: f64) -> Subpath {
    let (hw, hh) = (width / 2.0, height / 2.0);
    Subpath::closed_polygon(&[
        Point::new(hw, hh),
        Point::new(-hw, hh),
        Point::new(-hw, -hh),
        Point::new(hw, -hh),
    ])
}

/// Centered rounded rectangle: four quarter-arc corners joined by straight
/// edges, counterclockwise. The radius is clamped so opposing corners never
/// overlap; edges of zero length are dropped.
pub(crate) fn rounded_rect_subpath(width: f64, height: f64, radius: f64) -> Subpath {
    let (hw, hh) = (width / 2.0, height / 2.0);
    let r = radius.min(hw).min(hh);

    let right_bottom = Point::new(hw, -hh + r);
    let right_top = Point::new(hw, hh - r);
    let top_right = Point::new(hw - r, hh);
    let top_left = Point::new(-hw + r, hh);
    let left_top = Point::new(-hw, hh - r);
    let left_bottom = Point::new(-hw, -hh + r);
    let bottom_left = Point::new(-hw + r, -hh);
    let bottom_right = Point::new(hw - r, -hh);

    let up = Vec2::new(0.0, 1.0);
    let down = Vec2::new(0.0, -1.0);
    let left = Vec2::new(-1.0, 0.0);
    let right = Vec2::new(1.0, 0.0);

    let mut segments = Vec::with_capacity(8);
    if right_bottom != right_top {
        segments.push(line_cubic(right_bottom, right_top));
    }
    segments.push(quarter_arc(right_top, top_right, up, left, r));
    if top_right != top_left {
        segments.push(line_cubic(top_right, top_left));
    }
    segments.push(quarter_arc(top_left, left_top, left, down, r));
    if left_top != left_bottom {
        segments.push(line_cubic(left_top, left_bottom));
    }
    segments.push(quarter_arc(left_bottom, bottom_left, down, right, r));
    if bottom_left != bottom_right {
        segments.push(line_cubic(bottom_left, bottom_right));
    }
    segments.push(quarter_arc(bottom_right, right_bottom, right, up, r));

    Subpath::closed(segments)
}

/// 90-degree circular arc from `p0` to `p3` with entry/exit tangent
/// directions `t0`/`t3` (unit vectors along the direction of travel).
fn quarter_arc(p0: Point, p3: Point, t0: Vec2, t3: Vec2, radius: f64) -> CubicBez {
    let k = (4.0 / 3.0) * std::f64::consts::FRAC_PI_8.tan() * radius;
    CubicBez::new(p0, p0 + t0 * k, p3 - t3 * k, p3)
}

/// Unit circle as 8 equal cubic arcs, starting at (1, 0) and sweeping
/// counterclockwise. The final arc reuses the first anchor so the loop
/// closes exactly.
pub(crate) fn unit_circle_subpath() -> Subpath {
    let k = (4.0 / 3.0) * (std::f64::consts::PI / 16.0).tan();
    let anchors: Vec<Point> = (0..8)
        .map(|i| {
            let a = (i as f64) * std::f64::consts::FRAC_PI_4;
            Point::new(a.cos(), a.sin())
        })
        .collect();
    let tangents: Vec<Vec2> = (0..8)
        .map(|i| {
            let a = (i as f64) * std::f64::consts::FRAC_PI_4;
            Vec2::new(-a.sin(), a.cos())
        })
        .collect();

    let mut segments = Vec::with_capacity(8);
    for i in 0..8 {
        let j = (i + 1) % 8;
        segments.push(CubicBez::new(
            anchors[i],
            anchors[i] + tangents[i] * k,
            anchors[j] - tangents[j] * k,
            anchors[j],
        ));
    }
    Subpath::closed(segments)
}

#[cfg(test)]
#[path = "../../tests/unit/document/shapes.rs"]
mod tests;
