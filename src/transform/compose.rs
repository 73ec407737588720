use crate::foundation::core::Affine;
use crate::foundation::error::{CubistError, CubistResult};
use crate::path::lexer::lex_numbers;

/// One parsed `transform` attribute operation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformOp {
    /// `matrix(a b c d e f)`.
    Matrix {
        /// Linear x-from-x coefficient.
        a: f64,
        /// Linear y-from-x coefficient.
        b: f64,
        /// Linear x-from-y coefficient.
        c: f64,
        /// Linear y-from-y coefficient.
        d: f64,
        /// X shift.
        e: f64,
        /// Y shift.
        f: f64,
    },
    /// `translate(tx [ty])`; the one-argument form implies `ty = 0`.
    Translate {
        /// X shift.
        tx: f64,
        /// Y shift, in SVG's y-down frame.
        ty: f64,
    },
    /// `scale(sx [sy])`; the one-argument form scales both axes equally.
    Scale {
        /// X scale factor.
        sx: f64,
        /// Y scale factor.
        sy: f64,
    },
    /// Recognized but intentionally not applied.
    Rotate,
    /// Recognized but intentionally not applied.
    SkewX,
    /// Recognized but intentionally not applied.
    SkewY,
}

impl TransformOp {
    /// The affine this op applies in the Y-up output frame.
    ///
    /// Matrix coefficients carry negated `b`, `c` and `f`, and translate's
    /// `ty` negates, matching the mirrored Y axis of compiled geometry.
    /// Rotate and skew ops map to the identity.
    pub fn to_affine(self) -> Affine {
        match self {
            TransformOp::Matrix { a, b, c, d, e, f } => Affine::new([a, -b, -c, d, e, -f]),
            TransformOp::Translate { tx, ty } => Affine::translate((tx, -ty)),
            TransformOp::Scale { sx, sy } => Affine::new([sx, 0.0, 0.0, sy, 0.0, 0.0]),
            TransformOp::Rotate | TransformOp::SkewX | TransformOp::SkewY => Affine::IDENTITY,
        }
    }
}

/// Parse a `transform` attribute into its operation list.
///
/// Unknown operation names are skipped; malformed argument lists in a
/// recognized operation are an error.
pub fn parse_transform(text: &str) -> CubistResult<Vec<TransformOp>> {
    let mut ops = Vec::new();

    for chunk in text.split(')') {
        let chunk = chunk.trim().trim_start_matches(',').trim_start();
        if chunk.is_empty() {
            continue;
        }
        let Some((name, args)) = chunk.split_once('(') else {
            return Err(CubistError::transform(format!(
                "missing '(' in transform chunk '{chunk}'"
            )));
        };
        let name = name.trim();
        if !matches!(
            name,
            "matrix" | "translate" | "scale" | "rotate" | "skewX" | "skewY"
        ) {
            continue;
        }
        let nums = lex_numbers(args)?;

        let op = match name {
            "matrix" => {
                let [a, b, c, d, e, f] = nums.as_slice() else {
                    return Err(CubistError::transform(format!(
                        "matrix expects 6 numbers, got {}",
                        nums.len()
                    )));
                };
                TransformOp::Matrix {
                    a: *a,
                    b: *b,
                    c: *c,
                    d: *d,
                    e: *e,
                    f: *f,
                }
            }
            "translate" => match nums.as_slice() {
                [tx] => TransformOp::Translate { tx: *tx, ty: 0.0 },
                [tx, ty] => TransformOp::Translate { tx: *tx, ty: *ty },
                _ => {
                    return Err(CubistError::transform(format!(
                        "translate expects 1 or 2 numbers, got {}",
                        nums.len()
                    )));
                }
            },
            "scale" => match nums.as_slice() {
                [s] => TransformOp::Scale { sx: *s, sy: *s },
                [sx, sy] => TransformOp::Scale { sx: *sx, sy: *sy },
                _ => {
                    return Err(CubistError::transform(format!(
                        "scale expects 1 or 2 numbers, got {}",
                        nums.len()
                    )));
                }
            },
            "rotate" => match nums.len() {
                1 | 3 => TransformOp::Rotate,
                n => {
                    return Err(CubistError::transform(format!(
                        "rotate expects 1 or 3 numbers, got {n}"
                    )));
                }
            },
            "skewX" => match nums.len() {
                1 => TransformOp::SkewX,
                n => {
                    return Err(CubistError::transform(format!(
                        "skewX expects 1 number, got {n}"
                    )));
                }
            },
            "skewY" => match nums.len() {
                1 => TransformOp::SkewY,
                n => {
                    return Err(CubistError::transform(format!(
                        "skewY expects 1 number, got {n}"
                    )));
                }
            },
            _ => continue,
        };
        ops.push(op);
    }

    Ok(ops)
}

/// Compose parsed ops with an optional positional shift into one affine.
///
/// The shift maps first; each op then applies in document order, so the
/// last textual op ends up outermost.
pub fn compose(ops: &[TransformOp], shift: Option<(f64, f64)>) -> Affine {
    let mut t = match shift {
        Some((x, y)) => Affine::translate((x, -y)),
        None => Affine::IDENTITY,
    };
    for op in ops {
        t = op.to_affine() * t;
    }
    t
}

/// Build the affine for one element from its `transform` text and `x`/`y`
/// attributes.
///
/// The positional shift participates only when both attributes are present.
pub fn compose_element_transform(
    transform: Option<&str>,
    x: Option<f64>,
    y: Option<f64>,
) -> CubistResult<Affine> {
    let ops = match transform {
        Some(text) => parse_transform(text)?,
        None => Vec::new(),
    };
    let shift = match (x, y) {
        (Some(x), Some(y)) => Some((x, y)),
        _ => None,
    };
    Ok(compose(&ops, shift))
}

#[cfg(test)]
#[path = "../../tests/unit/transform/compose.rs"]
mod tests;
