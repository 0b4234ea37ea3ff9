//! Containment property tests for the canvas-fitting transform.

use unink::geom::Bounds;
use unink::transform::fit_bounds;

/// Small deterministic generator so the sweep is reproducible.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self, lo: f64, hi: f64) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let unit = ((self.0 >> 11) as f64) / ((1u64 << 53) as f64);
        lo + unit * (hi - lo)
    }
}

fn contained(bounds: &Bounds, raster: Option<(u32, u32)>) {
    let t = fit_bounds(bounds, 1620.0, 2160.0, raster).unwrap();
    for (x, y) in [
        (bounds.x_min, bounds.y_min),
        (bounds.x_max, bounds.y_min),
        (bounds.x_min, bounds.y_max),
        (bounds.x_max, bounds.y_max),
    ] {
        let (tx, ty) = t.apply(x, y);
        assert!(
            (0.0..=t.target_width()).contains(&tx),
            "x {tx} escaped [0, {}] for {bounds:?}",
            t.target_width()
        );
        assert!(
            (0.0..=t.target_height()).contains(&ty),
            "y {ty} escaped [0, {}] for {bounds:?}",
            t.target_height()
        );
    }
}

#[test]
fn test_extrema_always_contained() {
    let mut rng = Lcg(0x5eed);
    for _ in 0..500 {
        let x_a = rng.next_f64(-10_000.0, 10_000.0);
        let x_b = rng.next_f64(-10_000.0, 10_000.0);
        let y_a = rng.next_f64(-10_000.0, 10_000.0);
        let y_b = rng.next_f64(-10_000.0, 10_000.0);
        let bounds = Bounds {
            x_min: x_a.min(x_b),
            y_min: y_a.min(y_b),
            x_max: x_a.max(x_b),
            y_max: y_a.max(y_b),
        };
        contained(&bounds, None);
    }
}

#[test]
fn test_extrema_contained_with_raster() {
    let mut rng = Lcg(0xace);
    for _ in 0..200 {
        let x_a = rng.next_f64(-3_000.0, 3_000.0);
        let x_b = rng.next_f64(-3_000.0, 3_000.0);
        let y_a = rng.next_f64(-3_000.0, 3_000.0);
        let y_b = rng.next_f64(-3_000.0, 3_000.0);
        let bounds = Bounds {
            x_min: x_a.min(x_b),
            y_min: y_a.min(y_b),
            x_max: x_a.max(x_b),
            y_max: y_a.max(y_b),
        };
        contained(&bounds, Some((850, 1100)));
    }
}

#[test]
fn test_single_point_content() {
    contained(
        &Bounds {
            x_min: -42.0,
            y_min: 7.0,
            x_max: -42.0,
            y_max: 7.0,
        },
        None,
    );
}
