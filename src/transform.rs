//! Canvas fitting: the per-page mapping from tablet space into page
//! space.
//!
//! Stroke coordinates are anchored at the page's top-center and may
//! extend past the nominal canvas on any side. Fitting shifts the
//! content right/down and widens the canvas until every point lands
//! inside, then optionally scales the canvas onto a reference raster.

use crate::error::{Error, Result};
use crate::geom::{self, Bounds};
use crate::model::Block;

/// Iteration cap for the widening loops. Content is finite and every
/// step monotonically enlarges the canvas or shift, so hitting this cap
/// means a heuristic change introduced oscillation.
pub const MAX_FIT_ITERATIONS: u32 = 1000;

/// A page's coordinate mapping: shift, canvas size, and uniform scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Horizontal shift applied before scaling
    pub x_delta: f64,

    /// Vertical shift applied before scaling
    pub y_delta: f64,

    /// Canvas width, integral, tablet units
    pub width: f64,

    /// Canvas height, integral, tablet units
    pub height: f64,

    /// Horizontal scale onto the target space
    pub x_scale: f64,

    /// Vertical scale onto the target space
    pub y_scale: f64,
}

impl Transform {
    /// Map a tablet coordinate into the target space.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            (x + self.x_delta) * self.x_scale,
            (y + self.y_delta) * self.y_scale,
        )
    }

    /// Map a rectangle into the target space.
    pub fn apply_bounds(&self, bounds: &Bounds) -> Bounds {
        let (x_min, y_min) = self.apply(bounds.x_min, bounds.y_min);
        let (x_max, y_max) = self.apply(bounds.x_max, bounds.y_max);
        Bounds {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// Canvas width in the scaled (raster-aligned) target space.
    pub fn target_width(&self) -> f64 {
        self.width * self.x_scale
    }

    /// Canvas height in the scaled target space.
    pub fn target_height(&self) -> f64 {
        self.height * self.y_scale
    }
}

/// Fit a page's blocks into a canvas, optionally aligned to a reference
/// raster of the given pixel size.
pub fn fit_page(
    blocks: &[Block],
    canvas_width: f64,
    canvas_height: f64,
    raster: Option<(u32, u32)>,
) -> Result<Transform> {
    let bounds = geom::bounding_box(blocks).ok_or(Error::NoGeometry)?;
    fit_bounds(&bounds, canvas_width, canvas_height, raster)
}

/// Fit a known content bounding box. See [`fit_page`].
pub fn fit_bounds(
    bounds: &Bounds,
    canvas_width: f64,
    canvas_height: f64,
    raster: Option<(u32, u32)>,
) -> Result<Transform> {
    let Bounds {
        x_min,
        y_min,
        x_max,
        y_max,
    } = *bounds;

    let mut width = canvas_width;
    let mut height = canvas_height;
    // centering heuristic: stroke x coordinates are relative to the
    // page's top-center
    let mut x_delta = width / 2.0;
    let mut y_delta = (-y_min).max(0.0);
    let mut iterations = 0u32;

    // horizontal widening
    loop {
        let content = x_max - x_min;
        let left = x_min + x_delta;
        let right = x_max + x_delta;
        if content <= width && left >= 0.0 && right <= width && 2.0 * x_delta <= width {
            break;
        }
        iterations += 1;
        if iterations > MAX_FIT_ITERATIONS {
            return Err(Error::TransformDidNotConverge(MAX_FIT_ITERATIONS));
        }

        x_delta = winner(
            "x_delta",
            x_delta,
            &[(-x_min, "left edge"), (x_delta, "hold"), (width / 2.0, "center")],
        );
        let new_width = winner(
            "width",
            width,
            &[
                (content, "content width"),
                (width, "hold"),
                (2.0 * x_delta, "centering"),
                (x_max + x_delta, "right edge"),
            ],
        );
        if new_width > width {
            height *= new_width / width;
            width = new_width;
        }
    }

    // vertical widening, symmetric except the centering candidate uses
    // the content midpoint rather than half the canvas
    loop {
        let content = y_max - y_min;
        let top = y_min + y_delta;
        let bottom = y_max + y_delta;
        if content <= height && top >= 0.0 && bottom <= height && 2.0 * y_delta <= height {
            break;
        }
        iterations += 1;
        if iterations > MAX_FIT_ITERATIONS {
            return Err(Error::TransformDidNotConverge(MAX_FIT_ITERATIONS));
        }

        y_delta = winner(
            "y_delta",
            y_delta,
            &[
                (-y_min, "top edge"),
                (y_delta, "hold"),
                ((height - y_min - y_max) / 2.0, "center"),
            ],
        );
        let new_height = winner(
            "height",
            height,
            &[
                (content, "content height"),
                (height, "hold"),
                (2.0 * y_delta, "centering"),
                (y_max + y_delta, "bottom edge"),
            ],
        );
        if new_height > height {
            width *= new_height / height;
            height = new_height;
        }
    }

    width = width.ceil();
    height = height.ceil();

    check_extremum("x", x_min + x_delta, width)?;
    check_extremum("x", x_max + x_delta, width)?;
    check_extremum("y", y_min + y_delta, height)?;
    check_extremum("y", y_max + y_delta, height)?;

    let (mut x_scale, mut y_scale) = (1.0, 1.0);
    if let Some((raster_width, raster_height)) = raster {
        let (rw, rh) = (raster_width as f64, raster_height as f64);
        let scale = (((rw / width).min(rh / height)) * 100.0).round() / 100.0;
        let scale = scale.max(0.01);
        // the scaled canvas must cover the raster on both axes
        width = width.max(rw / scale).ceil();
        height = height.max(rh / scale).ceil();
        x_scale = scale;
        y_scale = scale;
    }

    Ok(Transform {
        x_delta,
        y_delta,
        width,
        height,
        x_scale,
        y_scale,
    })
}

/// Pick the largest candidate, logging which named reason won when the
/// value moved.
fn winner(what: &str, current: f64, candidates: &[(f64, &'static str)]) -> f64 {
    let mut best = candidates[0];
    for &candidate in &candidates[1..] {
        if candidate.0 > best.0 {
            best = candidate;
        }
    }
    if best.0 > current {
        log::debug!("fit: {what} {current} -> {} ({})", best.0, best.1);
    }
    best.0
}

fn check_extremum(axis: &'static str, value: f64, bound: f64) -> Result<()> {
    if !(0.0..=bound).contains(&value) {
        return Err(Error::TransformOutOfBounds { axis, value, bound });
    }
    Ok(())
}
