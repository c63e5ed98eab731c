//! Sampling a region on a pixel grid.
//!
//! Pixel `(0, 0)` is the top-left corner of the region, `(low.re, high.im)`,
//! and `(rows - 1, cols - 1)` the bottom-right one, `(high.re, low.im)`.
//! Both corners are sampled. A single row or column has a zero step along
//! that axis and samples only the starting coordinate.

use std::time::Instant;

use bincode::de::{BorrowDecoder, Decoder};
use bincode::error::DecodeError;
use bincode::{BorrowDecode, Decode, Encode};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FractalError, Result};
use crate::escape::EscapeRule;
use crate::math::C;
use crate::region::Region;

/// Largest grid whose counts still fit in one allocation.
pub const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<u32>();

/// Sampling resolution and escape cutoff.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Encode, Decode)]
pub struct GridSpec {
    rows: usize,
    cols: usize,
    max_iterations: u32,
}

impl GridSpec {
    pub fn new(rows: usize, cols: usize, max_iterations: u32) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(FractalError::EmptyGrid { rows, cols });
        }
        if max_iterations == 0 {
            return Err(FractalError::ZeroIterations);
        }
        if !rows.checked_mul(cols).is_some_and(|cells| cells <= MAX_CELLS) {
            return Err(FractalError::GridTooLarge { rows, cols });
        }
        Ok(GridSpec { rows, cols, max_iterations })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// How the cells of a grid get evaluated. Both produce identical grids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Encode, Decode, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    Serial,
    /// Rows spread over the rayon pool.
    #[default]
    Parallel,
}

/// Distance between neighbouring samples along each axis.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Steps {
    row: f64,
    col: f64,
}

impl Steps {
    fn new(region: &Region, spec: &GridSpec) -> Self {
        Steps {
            row: axis_step(region.height(), spec.rows),
            col: axis_step(region.width(), spec.cols),
        }
    }

    fn point(&self, region: &Region, row: usize, col: usize) -> C {
        C::new(
            region.low.re + col as f64 * self.col,
            region.high.im - row as f64 * self.row,
        )
    }
}

fn axis_step(span: f64, samples: usize) -> f64 {
    if samples > 1 { span / (samples - 1) as f64 } else { 0.0 }
}

/// Plane point sampled for pixel `(row, col)`.
pub fn point_at(region: &Region, spec: &GridSpec, row: usize, col: usize) -> C {
    Steps::new(region, spec).point(region, row, col)
}

/// Escape counts, one per pixel, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Encode)]
pub struct EscapeGrid {
    rows: usize,
    cols: usize,
    counts: Vec<u32>,
}

impl EscapeGrid {
    /// Wrap already computed counts; `counts.len()` must be `rows * cols`.
    pub fn from_counts(rows: usize, cols: usize, counts: Vec<u32>) -> Option<Self> {
        (rows.checked_mul(cols) == Some(counts.len())).then_some(EscapeGrid { rows, cols, counts })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        if row < self.rows && col < self.cols {
            Some(self.counts[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row < self.rows {
            self.counts.get(row * self.cols..(row + 1) * self.cols)
        } else {
            None
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        self.counts.chunks(self.cols.max(1))
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.counts
    }

    pub fn max_count(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }
}

// Decoded grids go through `from_counts` so a short buffer is rejected.
impl<Context> Decode<Context> for EscapeGrid {
    fn decode<D: Decoder<Context = Context>>(decoder: &mut D) -> std::result::Result<Self, DecodeError> {
        let rows = usize::decode(decoder)?;
        let cols = usize::decode(decoder)?;
        let counts = Vec::<u32>::decode(decoder)?;
        EscapeGrid::from_counts(rows, cols, counts)
            .ok_or(DecodeError::Other("escape grid length does not match its dimensions"))
    }
}

impl<'de, Context> BorrowDecode<'de, Context> for EscapeGrid {
    fn borrow_decode<D: BorrowDecoder<'de, Context = Context>>(
        decoder: &mut D,
    ) -> std::result::Result<Self, DecodeError> {
        Self::decode(decoder)
    }
}

/// Evaluate `rule` at every pixel, rows spread across the rayon pool.
pub fn compute_grid<R>(region: &Region, spec: &GridSpec, rule: &R) -> EscapeGrid
where
    R: EscapeRule + Sync,
{
    let started = Instant::now();
    let steps = Steps::new(region, spec);
    let mut counts = vec![0u32; spec.cell_count()];

    counts
        .par_chunks_mut(spec.cols)
        .enumerate()
        .for_each(|(i, row)| {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = rule.escape_count(steps.point(region, i, j), spec.max_iterations);
            }
        });

    tracing::debug!(
        rows = spec.rows,
        cols = spec.cols,
        max_iterations = spec.max_iterations,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "computed escape grid (parallel)"
    );
    EscapeGrid { rows: spec.rows, cols: spec.cols, counts }
}

/// Same as [`compute_grid`] on the calling thread.
pub fn compute_grid_serial<R: EscapeRule>(region: &Region, spec: &GridSpec, rule: &R) -> EscapeGrid {
    let started = Instant::now();
    let steps = Steps::new(region, spec);
    let mut counts = Vec::with_capacity(spec.cell_count());

    for i in 0..spec.rows {
        for j in 0..spec.cols {
            counts.push(rule.escape_count(steps.point(region, i, j), spec.max_iterations));
        }
    }

    tracing::debug!(
        rows = spec.rows,
        cols = spec.cols,
        max_iterations = spec.max_iterations,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "computed escape grid (serial)"
    );
    EscapeGrid { rows: spec.rows, cols: spec.cols, counts }
}

impl Sampling {
    pub fn compute<R>(self, region: &Region, spec: &GridSpec, rule: &R) -> EscapeGrid
    where
        R: EscapeRule + Sync,
    {
        match self {
            Sampling::Serial => compute_grid_serial(region, spec, rule),
            Sampling::Parallel => compute_grid(region, spec, rule),
        }
    }
}
