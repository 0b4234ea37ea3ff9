//! Rendering: raster crops and the vector composer.

mod crop;
mod svg;

pub use crop::{crop_region, encode_png};
pub use svg::{compose_svg, Trace};
