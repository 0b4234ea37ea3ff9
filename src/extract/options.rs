//! Extraction options.

use crate::geom::RECTANGULAR_AREA_RATIO;

/// Options controlling highlight extraction.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Crop rectangular selections out of the reference raster instead
    /// of tracing them
    pub crop_images: bool,

    /// Refine crop rectangles to the word boxes they intersect
    pub snap_to_text: bool,

    /// DPI for reference-page rasterization
    pub dpi: u32,

    /// Margin added on all sides of composed vector documents
    pub margin: f64,

    /// Polygon-to-bounding-box area ratio above which a stroke counts
    /// as a rectangle
    pub rectangle_threshold: f64,

    /// Process pages in parallel
    pub parallel: bool,
}

impl ExtractOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable raster cropping.
    pub fn with_cropping(mut self, crop: bool) -> Self {
        self.crop_images = crop;
        self
    }

    /// Enable or disable the snap-to-text crop refinement.
    pub fn with_snap_to_text(mut self, snap: bool) -> Self {
        self.snap_to_text = snap;
        self
    }

    /// Set the rasterization DPI.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Set the vector document margin.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Set the rectangularity threshold.
    pub fn with_rectangle_threshold(mut self, threshold: f64) -> Self {
        self.rectangle_threshold = threshold;
        self
    }

    /// Disable parallel page processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            crop_images: true,
            snap_to_text: true,
            dpi: 300,
            margin: 0.0,
            rectangle_threshold: RECTANGULAR_AREA_RATIO,
            parallel: true,
        }
    }
}
