//! End-to-end tests writing grid files to disk and reading them back.

use std::fs;
use std::path::PathBuf;

use julia_grid::{C, Family, Fractal, FractalConfig, FractalError, GridFile, GridSpec, Region, Sampling, output};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("julia-grid-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn golden_three_by_three_file() {
    let dir = scratch_dir("golden");
    let path = dir.join("julia.txt");

    let mut fractal = Fractal::julia(
        Region::new(C::new(-1.0, -1.0), C::new(1.0, 1.0)),
        GridSpec::new(3, 3, 10).unwrap(),
        C::ZERO,
    );
    output::save(&mut fractal, &path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            "3 3 10",
            "-1.0 1.0 -1.0 1.0",
            "0.0 0.0",
            "",
            " 2   10    2",
            "10   10   10",
            " 2   10    2",
        ]
    );
    assert!(text.ends_with('\n'));

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn zoomed_fractal_writes_the_new_region() {
    let dir = scratch_dir("zoom");
    let path = dir.join("zoomed.txt");

    let mut fractal = Fractal::julia(
        Region::new(C::new(-2.0, -2.0), C::new(2.0, 2.0)),
        GridSpec::new(5, 5, 30).unwrap(),
        C::new(-0.4, 0.6),
    );
    let wide = fractal.escapes().clone();
    fractal.zoom(2.0);
    output::save(&mut fractal, &path).unwrap();

    let file = GridFile::read(&path).unwrap();
    assert_eq!(file.region, Region::new(C::new(-1.0, -1.0), C::new(1.0, 1.0)));
    assert_eq!(&file.grid, fractal.escapes());
    assert_ne!(file.grid, wide);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn mandelbrot_config_end_to_end() {
    let dir = scratch_dir("config");
    let out = dir.join("mandel.txt");
    let config_path = dir.join("run.json");

    let config = FractalConfig {
        region: Region::new(C::new(-2.0, -1.0), C::new(1.0, 1.0)),
        rows: 7,
        cols: 13,
        max_iterations: 64,
        family: Family::mandelbrot(),
        output: out.clone(),
        zoom: None,
        center_zoom: false,
        sampling: Sampling::Serial,
    };
    fs::write(&config_path, config.to_json().unwrap()).unwrap();

    let loaded = FractalConfig::load(&config_path).unwrap();
    let mut fractal = loaded.build().unwrap();
    output::save(&mut fractal, &loaded.output).unwrap();

    let file = GridFile::read(&out).unwrap();
    assert_eq!(file.spec, GridSpec::new(7, 13, 64).unwrap());
    assert_eq!(file.param, C::ZERO);
    // (-1, 0) sits in the period-2 bulb: middle row, column 4
    assert_eq!(file.grid.get(3, 4), Some(64));
    // (1, 1) escapes quickly
    assert!(file.grid.get(0, 12).unwrap() < 5);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unwritable_output_is_reported_with_its_path() {
    let mut fractal = Fractal::julia(
        Region::new(C::new(-1.0, -1.0), C::new(1.0, 1.0)),
        GridSpec::new(2, 2, 5).unwrap(),
        C::ZERO,
    );
    let err = output::save(&mut fractal, "/nonexistent/dir/julia.txt").unwrap_err();
    match err {
        FractalError::Write { path, .. } => assert_eq!(path, PathBuf::from("/nonexistent/dir/julia.txt")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn reading_a_missing_grid_file_fails() {
    assert!(matches!(GridFile::read("/nonexistent/grid.txt"), Err(FractalError::Read { .. })));
}
