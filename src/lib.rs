pub mod math;
pub mod escape;
pub mod region;
pub mod grid;
pub mod fractal;
pub mod output;
pub mod config;
pub mod error;

pub use math::C;
pub use escape::{EscapeRule, Family, ESCAPE_RADIUS, julia_escapes, mandelbrot_escapes};
pub use region::Region;
pub use grid::{EscapeGrid, GridSpec, Sampling, compute_grid, compute_grid_serial, point_at};
pub use fractal::Fractal;
pub use output::GridFile;
pub use config::FractalConfig;
pub use error::{FractalError, Result};
