//! Scene block types produced by the upstream decoder.

use serde::{Deserialize, Serialize};

/// A single pen-input sample in tablet coordinates.
///
/// Dynamics keep the decoder's fixed-point conventions: `speed` and
/// `width` are stored at 4x device units, `pressure` spans 0-255, and
/// `direction` is a 0-255 encoding of the pen tilt in radians. The pen
/// physics formulas undo these scalings themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, tablet units (origin at the top-center)
    pub x: f64,

    /// Vertical position, tablet units
    pub y: f64,

    /// Pen speed, device units / 4
    #[serde(default)]
    pub speed: f64,

    /// Pen tilt, 0-255 encoding of radians
    #[serde(default)]
    pub direction: f64,

    /// Reported stroke width, device units / 4
    #[serde(default)]
    pub width: f64,

    /// Pen pressure, 0-255
    #[serde(default)]
    pub pressure: f64,
}

impl Point {
    /// Create a point with neutral dynamics.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            speed: 0.0,
            direction: 0.0,
            width: 0.0,
            pressure: 0.0,
        }
    }
}

/// One decoded unit of tablet input.
///
/// The variant set is closed: dispatch sites match exhaustively, so a
/// new block kind forces every consumer to be updated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A free-form pen stroke
    Line(InkItem),

    /// A glyph/selection marker, structurally identical to a stroke
    Glyph(InkItem),

    /// A positioned text paragraph
    Text(TextParagraph),

    /// A block the decoder could not read
    Unreadable {
        /// Decoder diagnostic for the failed block
        message: String,
    },
}

impl Block {
    /// The ink item, if this is a stroke or glyph block.
    pub fn as_ink(&self) -> Option<&InkItem> {
        match self {
            Block::Line(item) | Block::Glyph(item) => Some(item),
            _ => None,
        }
    }

    /// Check if this block is a text paragraph.
    pub fn is_text(&self) -> bool {
        matches!(self, Block::Text(_))
    }
}

/// A stroke or glyph entry in the page's edit sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InkItem {
    /// Tombstone length from the device's edit history; greater than
    /// zero means the stroke was deleted in a later revision.
    #[serde(default)]
    pub deleted_length: u32,

    /// Raw trailing metadata. The last four bytes, when at least five
    /// are present, carry a (b, g, r, a) color extension.
    #[serde(default)]
    pub extra_data: Vec<u8>,

    /// The stroke payload; absent for bookkeeping-only items.
    #[serde(default)]
    pub value: Option<InkStroke>,
}

impl InkItem {
    /// A highlight block carries the selected text as a payload and is
    /// never drawn.
    pub fn is_highlight(&self) -> bool {
        self.value
            .as_ref()
            .and_then(|v| v.text.as_deref())
            .is_some_and(|t| !t.is_empty())
    }

    /// Genuine handwriting has a point sequence to trace.
    pub fn is_handwriting(&self) -> bool {
        self.value.as_ref().is_some_and(|v| !v.points.is_empty())
    }
}

/// The payload of a stroke or glyph item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InkStroke {
    /// Device pen tool id
    pub tool: u8,

    /// Device tool-color id
    pub color: u8,

    /// Thickness scale the stroke was drawn with
    pub thickness_scale: f64,

    /// Ordered pen samples forming the gesture
    #[serde(default)]
    pub points: Vec<Point>,

    /// Selected text, present on highlight glyphs
    #[serde(default)]
    pub text: Option<String>,
}

/// A typed text paragraph anchored on the page.
///
/// Text anchors use a different coordinate origin than stroke points;
/// the extractor warns once per run when a page mixes both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextParagraph {
    /// Anchor x position, tablet units
    pub pos_x: f64,

    /// Anchor y position, tablet units
    pub pos_y: f64,

    /// Paragraph width hint from the device
    #[serde(default)]
    pub width: f64,

    /// Styled text runs, in reading order
    pub runs: Vec<TextRun>,
}

/// A run of text with one paragraph style.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content; may contain embedded newlines
    pub text: String,

    /// Style of this run
    #[serde(default)]
    pub style: ParagraphStyle,

    /// Style of the run this one continues from; bullet and checkbox
    /// styles here prefix the run with a marker glyph
    #[serde(default)]
    pub marker: Option<ParagraphStyle>,
}

/// Named paragraph styles recognized by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphStyle {
    /// Basic body text
    Basic,
    /// Plain body text
    #[default]
    Plain,
    /// Section heading
    Heading,
    /// Bold body text
    Bold,
    /// First-level bullet
    Bullet,
    /// Second-level bullet
    Bullet2,
    /// Unchecked checkbox
    Checkbox,
    /// Checked checkbox
    CheckboxChecked,
}

impl ParagraphStyle {
    /// CSS class name used by the vector composer.
    pub fn css_class(&self) -> &'static str {
        match self {
            ParagraphStyle::Basic => "basic",
            ParagraphStyle::Plain => "plain",
            ParagraphStyle::Heading => "heading",
            ParagraphStyle::Bold => "bold",
            ParagraphStyle::Bullet => "bullet",
            ParagraphStyle::Bullet2 => "bullet2",
            ParagraphStyle::Checkbox => "checkbox",
            ParagraphStyle::CheckboxChecked => "checkbox-checked",
        }
    }

    /// Marker glyph prefixed to runs continuing a list-style run.
    pub fn marker_glyph(&self) -> Option<&'static str> {
        match self {
            ParagraphStyle::Bullet | ParagraphStyle::Bullet2 => Some("\u{2022}"),
            ParagraphStyle::Checkbox => Some("\u{2610}"),
            ParagraphStyle::CheckboxChecked => Some("\u{2611}"),
            _ => None,
        }
    }
}
