//! Geometry utilities: bounding boxes and the rectangularity test.

use crate::model::{Block, Point};

/// Threshold above which a stroke's area ratio counts as rectangular.
pub const RECTANGULAR_AREA_RATIO: f64 = 0.8;

/// An axis-aligned rectangle in some coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Width of the rectangle.
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height of the rectangle.
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Area of the rectangle.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Grow the rectangle by `margin` on all sides, clamped to
    /// `[0, width] x [0, height]`.
    pub fn expand_clamped(&self, margin: f64, width: f64, height: f64) -> Bounds {
        Bounds {
            x_min: (self.x_min - margin).max(0.0),
            y_min: (self.y_min - margin).max(0.0),
            x_max: (self.x_max + margin).min(width),
            y_max: (self.y_max + margin).min(height),
        }
    }
}

/// Bounding box over a point sequence. `None` when empty.
pub fn point_bounds(points: &[Point]) -> Option<Bounds> {
    let first = points.first()?;
    let mut bounds = Bounds {
        x_min: first.x,
        y_min: first.y,
        x_max: first.x,
        y_max: first.y,
    };
    for p in &points[1..] {
        bounds.x_min = bounds.x_min.min(p.x);
        bounds.x_max = bounds.x_max.max(p.x);
        bounds.y_min = bounds.y_min.min(p.y);
        bounds.y_max = bounds.y_max.max(p.y);
    }
    Some(bounds)
}

/// Bounding box over every coordinate-bearing block: stroke and glyph
/// points plus text paragraph anchors. `None` when the page carries no
/// coordinates at all; callers must treat that as nothing to transform.
pub fn bounding_box(blocks: &[Block]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    let mut extend = |x: f64, y: f64| {
        let b = bounds.get_or_insert(Bounds {
            x_min: x,
            y_min: y,
            x_max: x,
            y_max: y,
        });
        b.x_min = b.x_min.min(x);
        b.x_max = b.x_max.max(x);
        b.y_min = b.y_min.min(y);
        b.y_max = b.y_max.max(y);
    };

    for block in blocks {
        match block {
            Block::Line(item) | Block::Glyph(item) => {
                if let Some(stroke) = &item.value {
                    for p in &stroke.points {
                        extend(p.x, p.y);
                    }
                }
            }
            Block::Text(paragraph) => extend(paragraph.pos_x, paragraph.pos_y),
            Block::Unreadable { .. } => {}
        }
    }
    bounds
}

/// Polygon area of a point sequence by the shoelace formula, treating
/// the sequence as a closed ring.
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    for (a, b) in points.iter().zip(points.iter().cycle().skip(1)) {
        twice_area += a.x * b.y - b.x * a.y;
    }
    (twice_area / 2.0).abs()
}

/// Test whether a stroke traces a rectangle: its polygon area must fill
/// at least `threshold` of its nonzero bounding-box area. A handwritten
/// rectangle around printed content signals "crop this region" rather
/// than "trace my ink".
pub fn is_rectangular(points: &[Point], threshold: f64) -> bool {
    if points.len() < 4 {
        return false;
    }
    let Some(bounds) = point_bounds(points) else {
        return false;
    };
    let box_area = bounds.area();
    if box_area <= 0.0 {
        return false;
    }
    polygon_area(points) / box_area >= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{InkItem, InkStroke, TextParagraph};

    fn rect_points() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(0.0, 50.0),
        ]
    }

    fn line_block(points: Vec<Point>) -> Block {
        Block::Line(InkItem {
            deleted_length: 0,
            extra_data: Vec::new(),
            value: Some(InkStroke {
                tool: 4,
                color: 0,
                thickness_scale: 1.0,
                points,
                text: None,
            }),
        })
    }

    #[test]
    fn test_perfect_rectangle_passes() {
        assert!(is_rectangular(&rect_points(), RECTANGULAR_AREA_RATIO));
    }

    #[test]
    fn test_degenerate_shape_fails() {
        // zero-area: all points on one horizontal line
        let flat = vec![
            Point::new(0.0, 10.0),
            Point::new(5.0, 10.0),
            Point::new(10.0, 10.0),
            Point::new(20.0, 10.0),
        ];
        assert!(!is_rectangular(&flat, RECTANGULAR_AREA_RATIO));
    }

    #[test]
    fn test_triangle_fails() {
        // a triangle fills half its bounding box
        let tri = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
            Point::new(0.0, 0.0),
        ];
        assert!(!is_rectangular(&tri, RECTANGULAR_AREA_RATIO));
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)];
        assert!(!is_rectangular(&points, RECTANGULAR_AREA_RATIO));
    }

    #[test]
    fn test_shoelace_area() {
        assert_eq!(polygon_area(&rect_points()), 5000.0);
    }

    #[test]
    fn test_bounding_box_includes_text_anchors() {
        let blocks = vec![
            line_block(vec![Point::new(-10.0, 5.0), Point::new(20.0, 40.0)]),
            Block::Text(TextParagraph {
                pos_x: 100.0,
                pos_y: -30.0,
                width: 0.0,
                runs: Vec::new(),
            }),
        ];
        let bounds = bounding_box(&blocks).unwrap();
        assert_eq!(bounds.x_min, -10.0);
        assert_eq!(bounds.x_max, 100.0);
        assert_eq!(bounds.y_min, -30.0);
        assert_eq!(bounds.y_max, 40.0);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert!(bounding_box(&[]).is_none());

        let blocks = vec![Block::Unreadable {
            message: "bad".to_string(),
        }];
        assert!(bounding_box(&blocks).is_none());
    }
}
