use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FractalError, Result};
use crate::escape::Family;
use crate::fractal::Fractal;
use crate::grid::{GridSpec, Sampling};
use crate::region::Region;

/// Everything needed to produce one grid file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractalConfig {
    pub region: Region,
    pub rows: usize,
    pub cols: usize,
    pub max_iterations: u32,
    pub family: Family,
    pub output: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    /// Zoom around the region's center instead of the plane origin.
    #[serde(default)]
    pub center_zoom: bool,
    #[serde(default)]
    pub sampling: Sampling,
}

impl FractalConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| FractalError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: FractalConfig = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate and turn into a [`Fractal`] with any zoom already applied.
    pub fn build(&self) -> Result<Fractal> {
        let spec = GridSpec::new(self.rows, self.cols, self.max_iterations)?;
        if self.region.is_degenerate() {
            tracing::warn!(
                low = %self.region.low,
                high = %self.region.high,
                "region is empty or inverted, grid will be degenerate"
            );
        }

        let mut fractal = Fractal::new(self.region, spec, self.family).with_sampling(self.sampling);
        if let Some(factor) = self.zoom {
            if !(factor.is_finite() && factor > 0.0) {
                return Err(FractalError::InvalidZoom(factor));
            }
            if self.center_zoom {
                fractal.zoom_about_center(factor);
            } else {
                fractal.zoom(factor);
            }
        }
        Ok(fractal)
    }
}
