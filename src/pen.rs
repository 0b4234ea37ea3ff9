//! Physical ink models for the device's pen tools.
//!
//! Each tool family maps per-point dynamics (speed, tilt, width,
//! pressure) to a rendered segment width, opacity, and color. The
//! formulas reproduce empirically reverse-engineered ink dynamics and
//! must not be simplified; constants are meaningful as written.

use std::f64::consts::PI;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::model::Point;

/// Points per rendered sub-segment when a tool does not re-segment.
const WHOLE_STROKE: usize = 1000;

/// Pen tools known to the device firmware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Paintbrush1,
    Pencil1,
    Ballpoint1,
    Marker1,
    Fineliner1,
    Highlighter1,
    Eraser,
    MechanicalPencil1,
    EraserArea,
    Paintbrush2,
    MechanicalPencil2,
    Pencil2,
    Ballpoint2,
    Marker2,
    Fineliner2,
    Highlighter2,
    Calligraphy,
    Shader,
}

impl Tool {
    /// Resolve a raw device tool id. Unknown ids are fatal: they signal
    /// a pen type this library has no physics for.
    pub fn from_id(id: u8) -> Result<Tool> {
        let tool = match id {
            0 => Tool::Paintbrush1,
            1 => Tool::Pencil1,
            2 => Tool::Ballpoint1,
            3 => Tool::Marker1,
            4 => Tool::Fineliner1,
            5 => Tool::Highlighter1,
            6 => Tool::Eraser,
            7 => Tool::MechanicalPencil1,
            8 => Tool::EraserArea,
            12 => Tool::Paintbrush2,
            13 => Tool::MechanicalPencil2,
            14 => Tool::Pencil2,
            15 => Tool::Ballpoint2,
            16 => Tool::Marker2,
            17 => Tool::Fineliner2,
            18 => Tool::Highlighter2,
            21 => Tool::Calligraphy,
            23 => Tool::Shader,
            other => return Err(Error::UnknownTool(other)),
        };
        Ok(tool)
    }
}

/// SVG line cap for a tool family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Linecap {
    Round,
    Square,
}

impl Linecap {
    /// The SVG attribute value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Linecap::Round => "round",
            Linecap::Square => "square",
        }
    }
}

/// Per-point dynamics fed to the segment formulas, in the decoder's
/// fixed-point conventions.
#[derive(Debug, Clone, Copy)]
pub struct Dynamics {
    pub speed: f64,
    pub direction: f64,
    pub width: f64,
    pub pressure: f64,
    /// Width of the previously rendered segment
    pub last_width: f64,
}

impl Dynamics {
    /// Dynamics at a sample point, carrying the previous segment width.
    pub fn at(point: &Point, last_width: f64) -> Self {
        Self {
            speed: point.speed,
            direction: point.direction,
            width: point.width,
            pressure: point.pressure,
            last_width,
        }
    }
}

/// How a tool derives its base width from the stroke's thickness scale.
enum BaseWidth {
    Identity,
    /// `scale^exp * mul`
    Power { exp: f64, mul: f64 },
    /// `scale * mul`
    Scale(f64),
    /// Fixed width regardless of the stroke's thickness scale
    Literal(f64),
}

impl BaseWidth {
    fn apply(&self, scale: f64) -> f64 {
        match self {
            BaseWidth::Identity => scale,
            BaseWidth::Power { exp, mul } => scale.powf(*exp) * mul,
            BaseWidth::Scale(mul) => scale * mul,
            BaseWidth::Literal(width) => *width,
        }
    }
}

/// A tool family's rendering behavior: segmentation, linecap, and pure
/// functions over per-point dynamics.
struct Profile {
    name: &'static str,
    segment_length: usize,
    linecap: Linecap,
    base_opacity: f64,
    base_width: BaseWidth,
    width: fn(&Pen, &Dynamics) -> f64,
    color: fn(&Pen, &Dynamics) -> (u8, u8, u8),
    opacity: fn(&Pen, &Dynamics) -> f64,
}

fn default_width(pen: &Pen, _d: &Dynamics) -> f64 {
    pen.base_width
}

fn default_color(pen: &Pen, _d: &Dynamics) -> (u8, u8, u8) {
    pen.base_color
}

fn default_opacity(pen: &Pen, _d: &Dynamics) -> f64 {
    pen.base_opacity
}

fn ballpoint_width(_pen: &Pen, d: &Dynamics) -> f64 {
    (0.5 + d.pressure / 255.0) + (d.width / 4.0) - 0.5 * ((d.speed / 4.0) / 50.0)
}

fn ballpoint_color(_pen: &Pen, d: &Dynamics) -> (u8, u8, u8) {
    // rendered as a gray level rather than opacity: overlapping dots
    // interfere when opacity is used
    let intensity = cutoff((0.1 * -((d.speed / 4.0) / 35.0)) + (1.2 * d.pressure / 255.0) + 0.5);
    let level = ((intensity - 1.0).abs() * 255.0) as u8;
    (level, level, level)
}

fn marker_width(_pen: &Pen, d: &Dynamics) -> f64 {
    0.9 * ((d.width / 4.0) - 0.4 * direction_to_tilt(d.direction)) + 0.1 * d.last_width
}

fn pencil_width(pen: &Pen, d: &Dynamics) -> f64 {
    let width = 0.7
        * ((((0.8 * pen.base_width) + (0.5 * d.pressure / 255.0)) * (d.width / 4.0))
            - (0.25 * direction_to_tilt(d.direction).powf(1.8))
            - (0.6 * (d.speed / 4.0) / 50.0));
    let max_width = pen.base_width * 10.0;
    width.min(max_width)
}

fn pencil_opacity(_pen: &Pen, d: &Dynamics) -> f64 {
    cutoff((0.1 * -((d.speed / 4.0) / 35.0)) + (d.pressure / 255.0)) - 0.1
}

fn brush_width(_pen: &Pen, d: &Dynamics) -> f64 {
    0.7 * (((1.0 + (1.4 * d.pressure / 255.0)) * (d.width / 4.0))
        - (0.5 * direction_to_tilt(d.direction))
        - ((d.speed / 4.0) / 50.0))
}

fn brush_color(pen: &Pen, d: &Dynamics) -> (u8, u8, u8) {
    let intensity = cutoff(((d.pressure / 255.0).powf(1.5) - 0.2 * ((d.speed / 4.0) / 50.0)) * 1.5);
    let rev = (intensity - 1.0).abs();
    let (r, g, b) = pen.base_color;
    (
        (rev * (255.0 - r as f64)) as u8,
        (rev * (255.0 - g as f64)) as u8,
        (rev * (255.0 - b as f64)) as u8,
    )
}

fn calligraphy_width(_pen: &Pen, d: &Dynamics) -> f64 {
    0.9 * (((1.0 + d.pressure / 255.0) * (d.width / 4.0))
        - 0.3 * direction_to_tilt(d.direction))
        + 0.1 * d.last_width
}

/// Decode the 0-255 direction byte back into a tilt angle in radians.
pub fn direction_to_tilt(direction: f64) -> f64 {
    direction * (PI * 2.0) / 255.0
}

fn cutoff(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

static FINELINER: Profile = Profile {
    name: "Fineliner",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Power { exp: 2.1, mul: 1.3 },
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static BALLPOINT: Profile = Profile {
    name: "Ballpoint",
    segment_length: 5,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Identity,
    width: ballpoint_width,
    color: ballpoint_color,
    opacity: default_opacity,
};

static MARKER: Profile = Profile {
    name: "Marker",
    segment_length: 3,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Identity,
    width: marker_width,
    color: default_color,
    opacity: default_opacity,
};

static PENCIL: Profile = Profile {
    name: "Pencil",
    segment_length: 2,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Identity,
    width: pencil_width,
    color: default_color,
    opacity: pencil_opacity,
};

static MECHANICAL_PENCIL: Profile = Profile {
    name: "Mechanical Pencil",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Round,
    base_opacity: 0.7,
    base_width: BaseWidth::Power { exp: 2.0, mul: 1.0 },
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static BRUSH: Profile = Profile {
    name: "Brush",
    segment_length: 2,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Identity,
    width: brush_width,
    color: brush_color,
    opacity: default_opacity,
};

static HIGHLIGHTER: Profile = Profile {
    name: "Highlighter",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Square,
    base_opacity: 0.3,
    base_width: BaseWidth::Literal(25.0),
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static SHADER: Profile = Profile {
    name: "Shader",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Square,
    base_opacity: 0.1,
    base_width: BaseWidth::Literal(12.0),
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static ERASER: Profile = Profile {
    name: "Eraser",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Square,
    base_opacity: 1.0,
    base_width: BaseWidth::Scale(2.0),
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static ERASE_AREA: Profile = Profile {
    name: "Erase Area",
    segment_length: WHOLE_STROKE,
    linecap: Linecap::Square,
    base_opacity: 0.0,
    base_width: BaseWidth::Identity,
    width: default_width,
    color: default_color,
    opacity: default_opacity,
};

static CALLIGRAPHY: Profile = Profile {
    name: "Calligraphy",
    segment_length: 2,
    linecap: Linecap::Round,
    base_opacity: 1.0,
    base_width: BaseWidth::Identity,
    width: calligraphy_width,
    color: default_color,
    opacity: default_opacity,
};

fn profile(tool: Tool) -> &'static Profile {
    match tool {
        Tool::Fineliner1 | Tool::Fineliner2 => &FINELINER,
        Tool::Ballpoint1 | Tool::Ballpoint2 => &BALLPOINT,
        Tool::Marker1 | Tool::Marker2 => &MARKER,
        Tool::Pencil1 | Tool::Pencil2 => &PENCIL,
        Tool::MechanicalPencil1 | Tool::MechanicalPencil2 => &MECHANICAL_PENCIL,
        Tool::Paintbrush1 | Tool::Paintbrush2 => &BRUSH,
        Tool::Highlighter1 | Tool::Highlighter2 => &HIGHLIGHTER,
        Tool::Shader => &SHADER,
        Tool::Eraser => &ERASER,
        Tool::EraserArea => &ERASE_AREA,
        Tool::Calligraphy => &CALLIGRAPHY,
    }
}

/// A resolved pen: one tool family's behavior bound to a stroke's color
/// and thickness. Derived per stroke, never persisted.
pub struct Pen {
    profile: &'static Profile,

    /// Width after the family's base-width transform
    pub base_width: f64,

    /// Opaque stroke color channels
    pub base_color: (u8, u8, u8),

    /// Whole-stroke opacity from the color's alpha channel
    pub stroke_opacity: f64,

    /// Family base opacity for constant-opacity tools
    pub base_opacity: f64,
}

impl Pen {
    /// Build the pen for a raw tool id.
    pub fn create(tool_id: u8, color: Rgba, thickness_scale: f64) -> Result<Pen> {
        Ok(Pen::for_tool(Tool::from_id(tool_id)?, color, thickness_scale))
    }

    /// Build the pen for a known tool.
    pub fn for_tool(tool: Tool, color: Rgba, thickness_scale: f64) -> Pen {
        let profile = profile(tool);
        // the eraser writes white ink no matter what color it carries
        let color = if tool == Tool::Eraser {
            Rgba::new(255, 255, 255, 255)
        } else {
            color
        };
        Pen {
            profile,
            base_width: profile.base_width.apply(thickness_scale),
            base_color: color.rgb(),
            stroke_opacity: color.a as f64 / 255.0,
            base_opacity: profile.base_opacity,
        }
    }

    /// Human-readable tool family name.
    pub fn name(&self) -> &'static str {
        self.profile.name
    }

    /// Points per rendered sub-segment.
    pub fn segment_length(&self) -> usize {
        self.profile.segment_length
    }

    /// SVG line cap for this family.
    pub fn linecap(&self) -> Linecap {
        self.profile.linecap
    }

    /// Width of the segment starting at the given dynamics.
    pub fn segment_width(&self, d: &Dynamics) -> f64 {
        (self.profile.width)(self, d)
    }

    /// Color of the segment starting at the given dynamics.
    pub fn segment_color(&self, d: &Dynamics) -> (u8, u8, u8) {
        (self.profile.color)(self, d)
    }

    /// Opacity of the segment starting at the given dynamics.
    pub fn segment_opacity(&self, d: &Dynamics) -> f64 {
        (self.profile.opacity)(self, d)
    }
}
