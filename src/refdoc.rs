//! The reference-document seam.
//!
//! Rasterization and text-layout queries against the annotated document
//! (PDF, EPUB) are external capabilities; the extractor consumes them
//! behind this trait so tests and callers can supply their own backend.

use crate::error::Result;
use crate::geom::Bounds;

/// A rendered page raster.
pub type Raster = image::RgbaImage;

/// The bounding box of one laid-out word on a reference page, in the
/// same pixel space as the rendered raster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WordBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl WordBox {
    /// The word box as a [`Bounds`] rectangle.
    pub fn bounds(&self) -> Bounds {
        Bounds {
            x_min: self.x_min,
            y_min: self.y_min,
            x_max: self.x_max,
            y_max: self.y_max,
        }
    }
}

/// Capabilities of the document a note annotates.
///
/// `Sync` so pages can be processed in parallel against one backend.
pub trait ReferenceDocument: Sync {
    /// Number of pages in the reference document.
    fn page_count(&self) -> usize;

    /// Render one page to a raster at the given DPI.
    fn render_page(&self, page_index: usize, dpi: u32) -> Result<Raster>;

    /// Word boxes intersecting a rectangle of the rendered page, in
    /// raster pixel space. Used by the optional snap-to-text crop
    /// refinement; an empty result leaves the crop rectangle as-is.
    fn words_in_rect(&self, page_index: usize, rect: &Bounds) -> Vec<WordBox>;
}
