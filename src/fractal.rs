use std::fmt;
use std::fs;
use std::path::Path;

use bincode::{Decode, Encode};

use crate::error::{FractalError, Result};
use crate::escape::Family;
use crate::grid::{EscapeGrid, GridSpec, Sampling};
use crate::math::C;
use crate::region::Region;

/// A region of one fractal family sampled at a fixed resolution.
///
/// The escape grid is derived state: it is computed on first read and
/// dropped by every method that changes the region, the resolution or the
/// family, so a stale grid is never handed out.
#[derive(Clone, Debug, PartialEq, Encode, Decode)]
pub struct Fractal {
    region: Region,
    spec: GridSpec,
    family: Family,
    sampling: Sampling,
    escapes: Option<EscapeGrid>,
}

impl Fractal {
    pub fn new(region: Region, spec: GridSpec, family: Family) -> Self {
        Fractal {
            region,
            spec,
            family,
            sampling: Sampling::default(),
            escapes: None,
        }
    }

    pub fn julia(region: Region, spec: GridSpec, c: C) -> Self {
        Fractal::new(region, spec, Family::julia(c))
    }

    pub fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    pub fn family(&self) -> &Family {
        &self.family
    }

    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// The cached grid, if it is current.
    pub fn cached(&self) -> Option<&EscapeGrid> {
        self.escapes.as_ref()
    }

    /// Escape counts for the current state, computing them if needed.
    pub fn escapes(&mut self) -> &EscapeGrid {
        let (region, spec, family, sampling) = (&self.region, &self.spec, &self.family, self.sampling);
        self.escapes
            .get_or_insert_with(|| sampling.compute(region, spec, family))
    }

    /// Consume the fractal and return its grid.
    pub fn into_escapes(mut self) -> EscapeGrid {
        match self.escapes.take() {
            Some(grid) => grid,
            None => self.sampling.compute(&self.region, &self.spec, &self.family),
        }
    }

    pub fn invalidate(&mut self) {
        self.escapes = None;
    }

    /// Replace both corners of the region.
    pub fn update_dimensions(&mut self, low: C, high: C) {
        self.set_region(Region::new(low, high));
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
        self.invalidate();
    }

    pub fn set_grid_spec(&mut self, spec: GridSpec) {
        self.spec = spec;
        self.invalidate();
    }

    pub fn set_family(&mut self, family: Family) {
        self.family = family;
        self.invalidate();
    }

    /// Sampling strategy only affects speed, the cached grid stays valid.
    pub fn set_sampling(&mut self, sampling: Sampling) {
        self.sampling = sampling;
    }

    /// Scale the region toward the plane origin by `1/factor`.
    pub fn zoom(&mut self, factor: f64) {
        let region = self.region.zoom(factor);
        self.set_region(region);
    }

    /// Scale the region by `1/factor` around its own center.
    pub fn zoom_about_center(&mut self, factor: f64) {
        let region = self.region.zoom_about_center(factor);
        self.set_region(region);
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let cfg = bincode::config::standard();
        let encoded = bincode::encode_to_vec(self, cfg)?;
        fs::write(path, encoded).map_err(|source| FractalError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(
            path = %path.display(),
            cached = self.escapes.is_some(),
            "saved fractal snapshot"
        );
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path).map_err(|source| FractalError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let cfg = bincode::config::standard();
        let (mut fractal, _len): (Fractal, usize) = bincode::decode_from_slice(&data, cfg)?;

        // bincode bypasses GridSpec::new
        fractal.spec = GridSpec::new(fractal.spec.rows(), fractal.spec.cols(), fractal.spec.max_iterations())?;
        let consistent = fractal.escapes.as_ref().is_none_or(|grid| {
            grid.rows() == fractal.spec.rows()
                && grid.cols() == fractal.spec.cols()
                && grid.max_count() <= fractal.spec.max_iterations()
        });
        if !consistent {
            tracing::warn!(path = %path.display(), "snapshot grid does not match its spec, discarding it");
            fractal.invalidate();
        }

        tracing::info!(path = %path.display(), "loaded fractal snapshot");
        Ok(fractal)
    }
}

impl fmt::Display for Fractal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) over [{}, {}] at {}x{}, {} iterations",
            self.family.name(),
            self.family.param(),
            self.region.low,
            self.region.high,
            self.spec.rows(),
            self.spec.cols(),
            self.spec.max_iterations()
        )
    }
}
