//! Error types for the unink library.

use std::io;
use thiserror::Error;

/// Result type alias for unink operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during highlight extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A tool-color id that is not in the device palette and carries no
    /// raw color payload.
    #[error("Unknown tool color id: {0}")]
    UnknownColor(u8),

    /// A pen tool id not supported by any known device firmware.
    #[error("Unknown pen tool id: {0}")]
    UnknownTool(u8),

    /// The page has no coordinate-bearing blocks to fit a canvas around.
    #[error("Page has no geometry to transform")]
    NoGeometry,

    /// The canvas-fitting loop did not reach a fixed point.
    #[error("Canvas fitting did not converge after {0} iterations")]
    TransformDidNotConverge(u32),

    /// A finished transform placed a point outside the canvas. This is a
    /// logic defect in the fitting heuristics, not a data problem.
    #[error("Transformed {axis} coordinate {value} outside [0, {bound}]")]
    TransformOutOfBounds {
        /// Axis name ("x" or "y")
        axis: &'static str,
        /// The out-of-bounds transformed coordinate
        value: f64,
        /// The canvas bound that was exceeded
        bound: f64,
    },

    /// Error encoding or cropping raster data.
    #[error("Image error: {0}")]
    Image(String),

    /// Error decoding a serialized scene document.
    #[error("Scene decoding error: {0}")]
    SceneDecode(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::Image(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::SceneDecode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownColor(42);
        assert_eq!(err.to_string(), "Unknown tool color id: 42");

        let err = Error::TransformOutOfBounds {
            axis: "x",
            value: -3.5,
            bound: 1620.0,
        };
        assert_eq!(
            err.to_string(),
            "Transformed x coordinate -3.5 outside [0, 1620]"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
