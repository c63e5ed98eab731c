use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use julia_grid::{C, Family, FractalConfig, FractalError, Region, Sampling, output};

/// Sample an escape-time fractal on a pixel grid and write the counts as a
/// text matrix.
#[derive(Debug, Parser)]
#[command(name = "julia-grid", version, allow_negative_numbers = true)]
struct Cli {
    #[arg(required_unless_present = "config")]
    low_real: Option<f64>,
    #[arg(required_unless_present = "config")]
    high_real: Option<f64>,
    #[arg(required_unless_present = "config")]
    low_imag: Option<f64>,
    #[arg(required_unless_present = "config")]
    high_imag: Option<f64>,
    #[arg(required_unless_present = "config")]
    rows: Option<usize>,
    #[arg(required_unless_present = "config")]
    cols: Option<usize>,
    #[arg(required_unless_present = "config")]
    max_iterations: Option<u32>,
    /// Real part of c (of the seed z0 for mandelbrot)
    #[arg(required_unless_present = "config")]
    c_real: Option<f64>,
    /// Imaginary part of c (of the seed z0 for mandelbrot)
    #[arg(required_unless_present = "config")]
    c_imag: Option<f64>,
    #[arg(required_unless_present = "config")]
    output: Option<PathBuf>,

    /// Read every setting from a JSON file instead
    #[arg(long, conflicts_with_all = ["low_real", "family", "zoom", "center", "serial"])]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FamilyArg::Julia)]
    family: FamilyArg,

    /// Shrink the region to 1/FACTOR of its size before sampling
    #[arg(long, value_name = "FACTOR")]
    zoom: Option<f64>,

    /// Zoom around the region's center instead of the origin
    #[arg(long, requires = "zoom")]
    center: bool,

    /// Sample on the current thread only
    #[arg(long)]
    serial: bool,

    /// Also save a binary snapshot of the fractal
    #[arg(long, value_name = "PATH")]
    snapshot: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FamilyArg {
    Julia,
    Mandelbrot,
}

impl Cli {
    fn into_config(self) -> Result<(FractalConfig, Option<PathBuf>), FractalError> {
        if let Some(path) = &self.config {
            return Ok((FractalConfig::load(path)?, self.snapshot));
        }

        // clap guarantees every positional is present without --config
        let (
            Some(low_real), Some(high_real), Some(low_imag), Some(high_imag),
            Some(rows), Some(cols), Some(max_iterations),
            Some(c_real), Some(c_imag), Some(output),
        ) = (
            self.low_real, self.high_real, self.low_imag, self.high_imag,
            self.rows, self.cols, self.max_iterations,
            self.c_real, self.c_imag, self.output,
        ) else {
            unreachable!("positional arguments are required without --config");
        };

        let param = C::new(c_real, c_imag);
        let family = match self.family {
            FamilyArg::Julia => Family::Julia { c: param },
            FamilyArg::Mandelbrot => Family::Mandelbrot { z0: param },
        };
        let config = FractalConfig {
            region: Region::new(C::new(low_real, low_imag), C::new(high_real, high_imag)),
            rows,
            cols,
            max_iterations,
            family,
            output,
            zoom: self.zoom,
            center_zoom: self.center,
            sampling: if self.serial { Sampling::Serial } else { Sampling::Parallel },
        };
        Ok((config, self.snapshot))
    }
}

fn run(cli: Cli) -> Result<(), FractalError> {
    let (config, snapshot) = cli.into_config()?;
    let mut fractal = config.build()?;
    tracing::info!("{fractal}");

    output::save(&mut fractal, &config.output)?;
    if let Some(path) = snapshot {
        fractal.save(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let mut message = format!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                message.push_str(&format!("\n  caused by: {cause}"));
                source = cause.source();
            }
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
