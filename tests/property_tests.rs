//! Property-based tests for the arithmetic, escape rules and sampler.

use julia_grid::{
    C, Family, GridFile, GridSpec, Region, Sampling, compute_grid, compute_grid_serial,
    julia_escapes, mandelbrot_escapes, output, Fractal,
};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    -4.0f64..4.0
}

fn complex() -> impl Strategy<Value = C> {
    (coord(), coord()).prop_map(|(re, im)| C::new(re, im))
}

proptest! {
    #[test]
    fn add_and_mul_commute(a in complex(), b in complex()) {
        prop_assert_eq!(a.add(b), b.add(a));
        prop_assert_eq!(a.mul(b), b.mul(a));
    }

    #[test]
    fn magnitude_is_non_negative(a in complex()) {
        prop_assert!(a.abs() >= 0.0);
    }

    #[test]
    fn escape_count_stays_in_range(p in complex(), c in complex(), max in 1u32..300) {
        let julia = julia_escapes(p, c, max);
        let mandel = mandelbrot_escapes(p, c, max);
        prop_assert!(julia <= max);
        prop_assert!(mandel <= max);
    }

    #[test]
    fn points_outside_radius_escape_at_once(angle in 0.0f64..std::f64::consts::TAU, r in 2.001f64..50.0) {
        let p = C::new(r * angle.cos(), r * angle.sin());
        prop_assume!(p.abs() > 2.0);
        prop_assert_eq!(julia_escapes(p, C::ZERO, 100), 0);
    }

    #[test]
    fn zoom_by_one_is_identity(low in complex(), high in complex()) {
        let r = Region::new(low, high);
        prop_assert_eq!(r.zoom(1.0), r);
    }

    #[test]
    fn zoom_by_two_halves_corners(low in complex(), high in complex()) {
        let z = Region::new(low, high).zoom(2.0);
        prop_assert_eq!(z.low, low.scale(0.5));
        prop_assert_eq!(z.high, high.scale(0.5));
    }

    #[test]
    fn thin_grids_are_well_defined(
        rows in 1usize..6,
        low in complex(),
        high in complex(),
        c in complex(),
    ) {
        let region = Region::new(low, high);
        for spec in [GridSpec::new(rows, 1, 40).unwrap(), GridSpec::new(1, rows, 40).unwrap()] {
            let grid = compute_grid(&region, &spec, &Family::julia(c));
            prop_assert_eq!(grid.as_slice().len(), spec.cell_count());
            prop_assert!(grid.as_slice().iter().all(|&n| n <= 40));
            for i in 0..spec.rows() {
                for j in 0..spec.cols() {
                    let p = julia_grid::point_at(&region, &spec, i, j);
                    prop_assert!(p.re.is_finite() && p.im.is_finite());
                }
            }
        }
    }

    #[test]
    fn sampling_strategies_agree(
        rows in 1usize..12,
        cols in 1usize..12,
        c in complex(),
        max in 1u32..80,
    ) {
        let region = Region::new(C::new(-1.5, -1.2), C::new(1.5, 1.2));
        let spec = GridSpec::new(rows, cols, max).unwrap();
        let rule = Family::julia(c);
        prop_assert_eq!(
            compute_grid(&region, &spec, &rule),
            compute_grid_serial(&region, &spec, &rule)
        );
    }

    #[test]
    fn text_format_is_lossless(
        rows in 1usize..8,
        cols in 1usize..8,
        max in 1u32..2000,
        low in complex(),
        c in complex(),
    ) {
        let high = low.add(C::new(1.25, 0.75));
        let mut fractal = Fractal::julia(Region::new(low, high), GridSpec::new(rows, cols, max).unwrap(), c)
            .with_sampling(Sampling::Serial);
        let text = output::to_text(&mut fractal);
        let parsed = GridFile::parse(&text).unwrap();
        prop_assert_eq!(parsed.region, *fractal.region());
        prop_assert_eq!(parsed.param, c);
        prop_assert_eq!(&parsed.grid, fractal.escapes());
    }
}
