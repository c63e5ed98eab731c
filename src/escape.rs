use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use crate::math::C;

/// Any orbit whose magnitude exceeds this radius diverges.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// Something that can tell how long a plane point takes to escape.
pub trait EscapeRule {
    /// Iterations before `point` escapes, capped at `max_iter`.
    fn escape_count(&self, point: C, max_iter: u32) -> u32;
}

/// Fractal family together with its constant.
#[derive(Clone, Copy, Debug, PartialEq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// `z -> z² + c`, orbit starts at the sampled point.
    Julia { c: C },
    /// `z -> z² + p`, orbit starts at `z0` and `p` is the sampled point.
    Mandelbrot { z0: C },
}

impl Family {
    pub fn julia(c: C) -> Self {
        Family::Julia { c }
    }

    pub fn mandelbrot() -> Self {
        Family::Mandelbrot { z0: C::ZERO }
    }

    /// The constant written to the third line of a grid file.
    pub fn param(&self) -> C {
        match *self {
            Family::Julia { c } => c,
            Family::Mandelbrot { z0 } => z0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Family::Julia { .. } => "julia",
            Family::Mandelbrot { .. } => "mandelbrot",
        }
    }
}

impl EscapeRule for Family {
    fn escape_count(&self, point: C, max_iter: u32) -> u32 {
        match *self {
            Family::Julia { c } => julia_escapes(point, c, max_iter),
            Family::Mandelbrot { z0 } => mandelbrot_escapes(point, z0, max_iter),
        }
    }
}

pub fn julia_escapes(z0: C, c: C, max_iter: u32) -> u32 {
    let mut z = z0;
    for i in 0..max_iter {
        if z.abs() > ESCAPE_RADIUS { return i; }
        z = z.mul(z).add(c);
    }
    max_iter
}

/// Same recurrence as Julia with the roles of point and constant swapped.
pub fn mandelbrot_escapes(c: C, z0: C, max_iter: u32) -> u32 {
    julia_escapes(z0, c, max_iter)
}
