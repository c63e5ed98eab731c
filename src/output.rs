//! Plain-text grid files.
//!
//! ```text
//! <rows> <cols> <maxIterations>
//! <low.re> <high.re> <low.im> <high.im>
//! <param.re> <param.im>
//!
//! <row 0>
//! ...
//! ```
//!
//! Matrix cells are right-aligned to the digit count of `maxIterations`,
//! and every column after the first gets three more spaces in front.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{FractalError, Result};
use crate::fractal::Fractal;
use crate::grid::{EscapeGrid, GridSpec};
use crate::math::C;
use crate::region::Region;

const COLUMN_GAP: &str = "   ";

/// Width of one matrix cell.
pub fn column_width(max_iterations: u32) -> usize {
    if max_iterations > 1 {
        max_iterations.ilog10() as usize + 1
    } else {
        1
    }
}

/// Write `fractal` to `out`, computing its grid first if needed.
pub fn write_to<W: Write>(fractal: &mut Fractal, out: W) -> io::Result<()> {
    let region = *fractal.region();
    let spec = *fractal.spec();
    let param = fractal.family().param();
    write_parts(&spec, &region, param, fractal.escapes(), out)
}

fn write_parts<W: Write>(
    spec: &GridSpec,
    region: &Region,
    param: C,
    grid: &EscapeGrid,
    mut out: W,
) -> io::Result<()> {
    writeln!(out, "{} {} {}", spec.rows(), spec.cols(), spec.max_iterations())?;
    writeln!(
        out,
        "{:?} {:?} {:?} {:?}",
        region.low.re, region.high.re, region.low.im, region.high.im
    )?;
    writeln!(out, "{:?} {:?}", param.re, param.im)?;
    writeln!(out)?;

    let width = column_width(spec.max_iterations());
    for row in grid.iter_rows() {
        for (j, count) in row.iter().enumerate() {
            if j > 0 {
                out.write_all(COLUMN_GAP.as_bytes())?;
            }
            write!(out, "{count:>width$}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn to_text(fractal: &mut Fractal) -> String {
    let mut buf = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_to(fractal, &mut buf);
    String::from_utf8_lossy(&buf).into_owned()
}

/// Write `fractal` to the file at `path`.
///
/// A failure leaves whatever was written so far on disk; such a file must
/// not be trusted.
pub fn save<P: AsRef<Path>>(fractal: &mut Fractal, path: P) -> Result<()> {
    let path = path.as_ref();
    let write_err = |source| FractalError::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    write_to(fractal, &mut out).map_err(write_err)?;
    out.flush().map_err(write_err)?;

    tracing::info!(
        path = %path.display(),
        rows = fractal.spec().rows(),
        cols = fractal.spec().cols(),
        "wrote escape grid"
    );
    Ok(())
}

/// A grid file read back from text.
#[derive(Clone, Debug, PartialEq)]
pub struct GridFile {
    pub spec: GridSpec,
    pub region: Region,
    pub param: C,
    pub grid: EscapeGrid,
}

impl GridFile {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| FractalError::Read {
            path: PathBuf::from(path),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(n, line)| (n + 1, line));

        let (n, line) = next_line(&mut lines, "dimensions")?;
        let [rows, cols, max_iterations] = fields::<3>(n, line)?;
        let spec = GridSpec::new(
            parse_num(n, rows)?,
            parse_num(n, cols)?,
            parse_num(n, max_iterations)?,
        )
        .map_err(|e| FractalError::parse(n, e.to_string()))?;

        let (n, line) = next_line(&mut lines, "region")?;
        let [low_re, high_re, low_im, high_im] = fields::<4>(n, line)?;
        let region = Region::new(
            C::new(parse_num(n, low_re)?, parse_num(n, low_im)?),
            C::new(parse_num(n, high_re)?, parse_num(n, high_im)?),
        );

        let (n, line) = next_line(&mut lines, "parameter")?;
        let [re, im] = fields::<2>(n, line)?;
        let param = C::new(parse_num(n, re)?, parse_num(n, im)?);

        let (n, line) = next_line(&mut lines, "blank separator")?;
        if !line.trim().is_empty() {
            return Err(FractalError::parse(n, "expected a blank line before the matrix"));
        }

        let mut counts = Vec::new();
        for _ in 0..spec.rows() {
            let (n, line) = next_line(&mut lines, "matrix row")?;
            let before = counts.len();
            for token in line.split_whitespace() {
                let count: u32 = parse_num(n, token)?;
                if count > spec.max_iterations() {
                    return Err(FractalError::parse(
                        n,
                        format!("count {count} exceeds max iterations {}", spec.max_iterations()),
                    ));
                }
                counts.push(count);
            }
            if counts.len() - before != spec.cols() {
                return Err(FractalError::parse(
                    n,
                    format!("expected {} columns, found {}", spec.cols(), counts.len() - before),
                ));
            }
        }

        let grid = EscapeGrid::from_counts(spec.rows(), spec.cols(), counts)
            .ok_or_else(|| FractalError::parse(0, "matrix size does not match dimensions"))?;
        Ok(GridFile { spec, region, param, grid })
    }
}

fn next_line<'a>(
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> Result<(usize, &'a str)> {
    lines
        .next()
        .ok_or_else(|| FractalError::parse(0, format!("unexpected end of file, missing {what}")))
}

fn fields<const N: usize>(n: usize, line: &str) -> Result<[&str; N]> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    parts
        .try_into()
        .map_err(|parts: Vec<&str>| FractalError::parse(n, format!("expected {N} fields, found {}", parts.len())))
}

fn parse_num<T: std::str::FromStr>(n: usize, token: &str) -> Result<T> {
    token
        .parse()
        .map_err(|_| FractalError::parse(n, format!("not a number: {token:?}")))
}
