use std::f64::consts::PI;

use kurbo::ParamCurve as _;

use crate::foundation::core::{Affine, CubicBez, Point, Subpath, Vec2};
use crate::foundation::error::{CubistError, CubistResult};
use crate::foundation::math::{line_cubic, points_close, quad_cubic, turn_angle};
use crate::path::lexer::{CommandGroup, lex_path};

/// Tolerance used when deciding whether a close command needs a closing edge.
const CLOSE_EPS: f64 = 1e-8;

/// Path post-processing configuration.
#[derive(Clone, Copy, Debug)]
pub struct PathOptions {
    /// Split segments adjoining a sharp corner, for triangulation stability.
    pub subdivide_sharp: bool,
    /// Corner turn angle above which subdivision triggers, in radians.
    pub sharp_threshold_rad: f64,
    /// Remove segments whose four control points coincide.
    pub drop_null_segments: bool,
    /// Coincidence tolerance used by null-segment removal.
    pub null_epsilon: f64,
}

impl Default for PathOptions {
    fn default() -> Self {
        Self {
            subdivide_sharp: false,
            sharp_threshold_rad: PI / 6.0,
            drop_null_segments: false,
            null_epsilon: 1e-9,
        }
    }
}

/// Counters accumulated across one compiler's lifetime.
///
/// `compiles` lets callers observe whether a cache bypassed compilation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompileStats {
    /// Full path-string compilations performed.
    pub compiles: u64,
    /// Total segments emitted across all compilations.
    pub segments: u64,
}

/// Compiles SVG path-command strings into cubic subpaths.
#[derive(Debug, Default)]
pub struct PathCompiler {
    opts: PathOptions,
    stats: CompileStats,
}

/// Compile one path string with default options.
pub fn compile_path(d: &str) -> CubistResult<Vec<Subpath>> {
    let mut compiler = PathCompiler::default();
    compiler.compile(d)
}

impl PathCompiler {
    /// Compiler with explicit options.
    pub fn new(opts: PathOptions) -> Self {
        Self {
            opts,
            stats: CompileStats::default(),
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> CompileStats {
        self.stats
    }

    /// Compile one path-command string into subpaths.
    ///
    /// The result is in the Y-up output frame: the SVG Y axis is mirrored
    /// about the origin once the whole string has been consumed. An empty or
    /// whitespace-only string compiles to an empty list.
    #[tracing::instrument(skip(self, d), fields(len = d.len()))]
    pub fn compile(&mut self, d: &str) -> CubistResult<Vec<Subpath>> {
        let groups = lex_path(d)?;
        let mut interp = Interp::default();
        for group in &groups {
            interp.run_group(group)?;
        }
        let mut subpaths = interp.finish();

        for subpath in &mut subpaths {
            subpath.apply_affine(Affine::FLIP_Y);
        }

        if self.opts.subdivide_sharp {
            subdivide_sharp(&mut subpaths, self.opts.sharp_threshold_rad);
        }
        if self.opts.drop_null_segments {
            drop_null_segments(&mut subpaths, self.opts.null_epsilon);
        }

        self.stats.compiles += 1;
        self.stats.segments += subpaths
            .iter()
            .map(|sp| sp.segments.len() as u64)
            .sum::<u64>();
        Ok(subpaths)
    }
}

/// Drawing verbs, one per supported command letter pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Verb {
    Move,
    Line,
    Horiz,
    Vert,
    Cubic,
    Smooth,
    Quad,
    SmoothQuad,
}

impl Verb {
    fn from_letter(upper: u8) -> Option<Verb> {
        match upper {
            b'M' => Some(Verb::Move),
            b'L' => Some(Verb::Line),
            b'H' => Some(Verb::Horiz),
            b'V' => Some(Verb::Vert),
            b'C' => Some(Verb::Cubic),
            b'S' => Some(Verb::Smooth),
            b'Q' => Some(Verb::Quad),
            b'T' => Some(Verb::SmoothQuad),
            _ => None,
        }
    }

    /// Numbers consumed per invocation. H and V take a single axis value;
    /// every other verb takes whole coordinate pairs.
    fn arg_count(self) -> usize {
        match self {
            Verb::Horiz | Verb::Vert => 1,
            Verb::Move | Verb::Line | Verb::SmoothQuad => 2,
            Verb::Smooth | Verb::Quad => 4,
            Verb::Cubic => 6,
        }
    }

    /// Verb used by leftover argument tuples after this one ran.
    fn next_in_chain(self) -> Verb {
        match self {
            Verb::Move => Verb::Line,
            other => other,
        }
    }
}

/// Interpreter state for a single compile call.
#[derive(Debug, Default)]
struct Interp {
    done: Vec<Subpath>,
    current: Vec<CubicBez>,
    subpath_start: Point,
    cur: Point,
    has_current: bool,
    last_c2: Option<Point>,
    last_quad_ctrl: Option<Point>,
}

impl Interp {
    fn run_group(&mut self, group: &CommandGroup) -> CubistResult<()> {
        let is_rel = group.cmd.is_ascii_lowercase();
        let upper = group.cmd.to_ascii_uppercase();

        if upper == b'A' {
            return Err(CubistError::not_implemented(
                "elliptical arc commands (A/a) are not supported",
            ));
        }
        if upper == b'Z' {
            if !group.args.is_empty() {
                return Err(CubistError::path_syntax("arguments after close command"));
            }
            if !self.has_current {
                return Err(CubistError::path_syntax("close command before any move"));
            }
            self.close_subpath();
            return Ok(());
        }

        let Some(verb) = Verb::from_letter(upper) else {
            return Err(CubistError::path_syntax(format!(
                "unknown command '{}'",
                group.cmd as char
            )));
        };
        if !self.has_current && verb != Verb::Move {
            return Err(CubistError::path_syntax(format!(
                "command '{}' before any move",
                group.cmd as char
            )));
        }

        let nums = &group.args[..];
        if nums.is_empty() {
            return Err(CubistError::path_syntax(format!(
                "missing arguments for command '{}'",
                group.cmd as char
            )));
        }

        // Leftover arguments repeat the verb; extras after a move continue as
        // line-tos. An explicit loop here keeps depth flat on long paths. A
        // remainder that cannot fill the verb's arity is a syntax error, never
        // padded out.
        let mut verb = verb;
        let mut idx = 0usize;
        while idx < nums.len() {
            let needed = verb.arg_count();
            if nums.len() - idx < needed {
                return Err(CubistError::path_syntax(format!(
                    "incomplete arguments for command '{}'",
                    group.cmd as char
                )));
            }
            self.apply(verb, is_rel, &nums[idx..idx + needed]);
            idx += needed;
            verb = verb.next_in_chain();
        }
        Ok(())
    }

    fn apply(&mut self, verb: Verb, is_rel: bool, nums: &[f64]) {
        match verb {
            Verb::Move => {
                let p = self.resolve(nums[0], nums[1], is_rel);
                self.start_subpath(p);
            }
            Verb::Line => {
                let p = self.resolve(nums[0], nums[1], is_rel);
                self.line_to(p);
            }
            Verb::Horiz => {
                // Absolute H keeps the current y; relative h leaves the
                // omitted axis at zero rather than carrying it forward.
                let p = if is_rel {
                    Point::new(self.cur.x + nums[0], 0.0)
                } else {
                    Point::new(nums[0], self.cur.y)
                };
                self.line_to(p);
            }
            Verb::Vert => {
                let p = if is_rel {
                    Point::new(0.0, self.cur.y + nums[0])
                } else {
                    Point::new(self.cur.x, nums[0])
                };
                self.line_to(p);
            }
            Verb::Cubic => {
                let c1 = self.resolve(nums[0], nums[1], is_rel);
                let c2 = self.resolve(nums[2], nums[3], is_rel);
                let end = self.resolve(nums[4], nums[5], is_rel);
                self.cubic_to(c1, c2, end);
            }
            Verb::Smooth => {
                let c1 = match self.last_c2 {
                    Some(prev) => reflect(prev, self.cur),
                    None => self.cur,
                };
                let c2 = self.resolve(nums[0], nums[1], is_rel);
                let end = self.resolve(nums[2], nums[3], is_rel);
                self.cubic_to(c1, c2, end);
            }
            Verb::Quad => {
                let q = self.resolve(nums[0], nums[1], is_rel);
                let end = self.resolve(nums[2], nums[3], is_rel);
                self.quad_to(q, end);
            }
            Verb::SmoothQuad => {
                let q = match self.last_quad_ctrl {
                    Some(prev) => reflect(prev, self.cur),
                    None => self.cur,
                };
                let end = self.resolve(nums[0], nums[1], is_rel);
                self.quad_to(q, end);
            }
        }
    }

    fn resolve(&self, x: f64, y: f64, is_rel: bool) -> Point {
        if is_rel && self.has_current {
            Point::new(self.cur.x + x, self.cur.y + y)
        } else {
            Point::new(x, y)
        }
    }

    fn start_subpath(&mut self, p: Point) {
        self.flush_open();
        self.subpath_start = p;
        self.cur = p;
        self.has_current = true;
        self.last_c2 = None;
        self.last_quad_ctrl = None;
    }

    fn line_to(&mut self, p: Point) {
        let seg = line_cubic(self.cur, p);
        self.push_segment(seg);
    }

    fn cubic_to(&mut self, c1: Point, c2: Point, end: Point) {
        self.push_segment(CubicBez::new(self.cur, c1, c2, end));
    }

    fn quad_to(&mut self, q: Point, end: Point) {
        let seg = quad_cubic(self.cur, q, end);
        self.push_segment(seg);
        self.last_quad_ctrl = Some(q);
    }

    fn push_segment(&mut self, seg: CubicBez) {
        self.cur = seg.p3;
        self.last_c2 = Some(seg.p2);
        self.last_quad_ctrl = None;
        self.current.push(seg);
    }

    fn close_subpath(&mut self) {
        if !points_close(self.cur, self.subpath_start, CLOSE_EPS) {
            let seg = line_cubic(self.cur, self.subpath_start);
            self.push_segment(seg);
        }
        if !self.current.is_empty() {
            self.done
                .push(Subpath::closed(std::mem::take(&mut self.current)));
        }
        // Drawing after a close continues from the subpath start.
        self.cur = self.subpath_start;
        self.last_c2 = None;
        self.last_quad_ctrl = None;
    }

    fn flush_open(&mut self) {
        if !self.current.is_empty() {
            self.done
                .push(Subpath::open(std::mem::take(&mut self.current)));
        }
    }

    fn finish(mut self) -> Vec<Subpath> {
        self.flush_open();
        self.done
    }
}

fn reflect(prev: Point, through: Point) -> Point {
    Point::new(2.0 * through.x - prev.x, 2.0 * through.y - prev.y)
}

fn start_tangent(seg: &CubicBez) -> Vec2 {
    let d = seg.p1 - seg.p0;
    if d.hypot2() > 0.0 { d } else { seg.p3 - seg.p0 }
}

fn end_tangent(seg: &CubicBez) -> Vec2 {
    let d = seg.p3 - seg.p2;
    if d.hypot2() > 0.0 { d } else { seg.p3 - seg.p0 }
}

/// Split segments on either side of a corner whose turn exceeds `threshold`.
fn subdivide_sharp(subpaths: &mut [Subpath], threshold: f64) {
    for subpath in subpaths.iter_mut() {
        let n = subpath.segments.len();
        if n < 2 {
            continue;
        }
        let mut sharp = vec![false; n - 1];
        for (i, pair) in subpath.segments.windows(2).enumerate() {
            sharp[i] = turn_angle(end_tangent(&pair[0]), start_tangent(&pair[1])) > threshold;
        }

        let mut out = Vec::with_capacity(n);
        for (i, seg) in subpath.segments.iter().enumerate() {
            let split = (i > 0 && sharp[i - 1]) || (i < n - 1 && sharp[i]);
            if split {
                out.push(seg.subsegment(0.0..0.5));
                out.push(seg.subsegment(0.5..1.0));
            } else {
                out.push(*seg);
            }
        }
        subpath.segments = out;
    }
}

/// Remove segments whose four control points coincide within `eps`.
fn drop_null_segments(subpaths: &mut Vec<Subpath>, eps: f64) {
    for subpath in subpaths.iter_mut() {
        let mut kept: Vec<CubicBez> = Vec::with_capacity(subpath.segments.len());
        let mut pending_start: Option<Point> = None;
        for seg in &subpath.segments {
            let null = points_close(seg.p0, seg.p1, eps)
                && points_close(seg.p0, seg.p2, eps)
                && points_close(seg.p0, seg.p3, eps);
            if null {
                if pending_start.is_none() {
                    pending_start = Some(seg.p0);
                }
                continue;
            }
            let mut seg = *seg;
            if let Some(start) = pending_start.take() {
                // Keep exact endpoint sharing across the removed run.
                seg.p0 = start;
            }
            kept.push(seg);
        }
        subpath.segments = kept;
    }
    subpaths.retain(|sp| !sp.segments.is_empty());
}

#[cfg(test)]
#[path = "../../tests/unit/path/compiler.rs"]
mod tests;
