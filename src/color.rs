//! Color resolution for strokes and glyphs.
//!
//! A block's color comes from one of two places: a raw trailing color
//! payload embedded by newer firmware, or the device's fixed tool-color
//! palette. Palette values were read off exported documents.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::InkItem;

/// An RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    /// Create a color from channel values.
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// The opaque color channels as a tuple.
    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// CSS `rgb(...)` notation, alpha excluded.
    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }

    /// Lowercase hex notation without alpha, e.g. `#b33e39`.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Look up a device tool-color id in the fixed palette.
pub fn palette_color(id: u8) -> Option<(u8, u8, u8)> {
    let rgb = match id {
        0 => (0, 0, 0),       // black
        1 => (144, 144, 144), // gray
        2 => (255, 255, 255), // white
        3 => (251, 247, 25),  // yellow
        4 => (0, 255, 0),     // green
        5 => (255, 192, 203), // pink
        6 => (78, 105, 201),  // blue
        7 => (179, 62, 57),   // red
        8 => (125, 125, 125), // gray overlap
        9 => (255, 237, 117), // highlight
        10 => (161, 216, 125), // green 2
        11 => (139, 208, 229), // cyan
        12 => (183, 130, 205), // magenta
        13 => (247, 232, 81),  // yellow 2
        _ => return None,
    };
    Some(rgb)
}

/// Resolve the color of a stroke or glyph item.
///
/// Items carrying at least five bytes of raw trailing metadata encode
/// their color in the last four bytes as (b, g, r, a). Everything else
/// falls back to the palette; an id outside the palette is a hard
/// [`Error::UnknownColor`].
pub fn resolve_color(item: &InkItem) -> Result<Rgba> {
    if item.extra_data.len() >= 5 {
        let tail = &item.extra_data[item.extra_data.len() - 4..];
        let (b, g, r, a) = (tail[0], tail[1], tail[2], tail[3]);
        return Ok(Rgba::new(r, g, b, a));
    }

    let id = item.value.as_ref().map_or(0, |v| v.color);
    let (r, g, b) = palette_color(id).ok_or(Error::UnknownColor(id))?;
    Ok(Rgba::new(r, g, b, 255))
}
