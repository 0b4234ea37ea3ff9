//! Cropping reference-page rasters into PNG artifacts.

use std::io::Cursor;

use image::imageops;

use crate::error::Result;
use crate::geom::Bounds;
use crate::model::{Artifact, ArtifactKind};
use crate::refdoc::Raster;

/// Crop a rectangle out of a rendered page and encode it as a PNG
/// artifact. The rectangle is clamped to the raster and kept at least
/// one pixel on each axis so a selection never silently vanishes.
pub fn crop_region(raster: &Raster, rect: &Bounds) -> Result<Artifact> {
    let (raster_width, raster_height) = raster.dimensions();
    if raster_width == 0 || raster_height == 0 {
        return Err(crate::error::Error::Image("empty page raster".to_string()));
    }

    let x = rect.x_min.floor().clamp(0.0, (raster_width - 1) as f64) as u32;
    let y = rect.y_min.floor().clamp(0.0, (raster_height - 1) as f64) as u32;
    let width = (rect.x_max.ceil() as u32)
        .clamp(x + 1, raster_width)
        .saturating_sub(x);
    let height = (rect.y_max.ceil() as u32)
        .clamp(y + 1, raster_height)
        .saturating_sub(y);

    let cropped = imageops::crop_imm(raster, x, y, width, height).to_image();
    Ok(Artifact {
        kind: ArtifactKind::Png,
        bytes: encode_png(&cropped)?,
    })
}

/// Encode a raster as PNG bytes.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    raster.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}
