//! The vector composer: traced strokes and typed text as a standalone
//! SVG document.

use std::borrow::Cow;
use std::fmt::Write as _;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::model::{Artifact, ArtifactKind, InkStroke, TextParagraph};
use crate::pen::{Dynamics, Pen};
use crate::refdoc::Raster;
use crate::render::crop::encode_png;
use crate::transform::Transform;

/// One vector-render candidate with its resolved ink color.
#[derive(Debug)]
pub enum Trace<'a> {
    /// A handwriting stroke or glyph
    Ink {
        /// The stroke payload
        stroke: &'a InkStroke,
        /// Resolved stroke color
        color: Rgba,
    },
    /// A typed text paragraph, rendered in black ink
    Text(&'a TextParagraph),
}

/// Assemble the page's vector-render candidates into one standalone SVG
/// document. The canvas is the transform's scaled size plus `margin` on
/// all sides; a reference raster, when present, is embedded as a base64
/// background so the document remains viewable on its own.
pub fn compose_svg(
    traces: &[Trace<'_>],
    transform: &Transform,
    background: Option<&Raster>,
    margin: f64,
) -> Result<Artifact> {
    let content_width = transform.target_width();
    let content_height = transform.target_height();
    let width = (content_width + 2.0 * margin).ceil();
    let height = (content_height + 2.0 * margin).ceil();

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" \
         xmlns:xlink=\"http://www.w3.org/1999/xlink\" \
         height=\"{height}\" width=\"{width}\">"
    );
    out.push_str(PAGE_SCRIPT);

    if let Some(raster) = background {
        let encoded = BASE64.encode(encode_png(raster)?);
        let _ = writeln!(
            out,
            "<image xlink:href=\"data:image/png;base64,{encoded}\" \
             x=\"{margin}\" y=\"{margin}\" \
             width=\"{content_width}\" height=\"{content_height}\" />"
        );
    }

    out.push_str("<g id=\"p1\" style=\"display:inline\">\n");
    out.push_str(
        "<filter id=\"blurMe\"><feGaussianBlur in=\"SourceGraphic\" stdDeviation=\"10\" /></filter>\n",
    );

    if traces.iter().any(|t| matches!(t, Trace::Text(_))) {
        out.push_str(TEXT_STYLES);
    }

    for trace in traces {
        match trace {
            Trace::Ink { stroke, color } => draw_stroke(&mut out, stroke, *color, transform, margin)?,
            Trace::Text(paragraph) => draw_text(&mut out, paragraph, transform, margin),
        }
    }

    out.push_str("<!-- clickable rect to flip pages -->\n");
    let _ = writeln!(
        out,
        "<rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill-opacity=\"0\"/>"
    );
    out.push_str("</g>\n</svg>\n");

    Ok(Artifact {
        kind: ArtifactKind::Svg,
        bytes: out.into_bytes(),
    })
}

/// Inert page-navigation affordance, reserved for multi-page output.
const PAGE_SCRIPT: &str = r#"<script type="application/ecmascript"><![CDATA[
var visiblePage = 'p1';
function goToPage(page) {
    document.getElementById(visiblePage).setAttribute('style', 'display: none');
    document.getElementById(page).setAttribute('style', 'display: inline');
    visiblePage = page;
}
]]></script>
"#;

const TEXT_STYLES: &str = r#"<style>
.basic, .plain { font-family: sans-serif; font-size: 40px }
.heading { font-family: serif; font-size: 50px }
.bold { font-family: sans-serif; font-size: 50px; font-weight: bold }
.bullet, .bullet2 { font-family: sans-serif; font-size: 40px }
.checkbox, .checkbox-checked { font-family: sans-serif; font-size: 40px }
</style>
"#;

/// Horizontal indent after a bullet or checkbox marker glyph.
const MARKER_INDENT: f64 = 50.0;

fn draw_stroke(
    out: &mut String,
    stroke: &InkStroke,
    color: Rgba,
    transform: &Transform,
    margin: f64,
) -> Result<()> {
    let pen = Pen::create(stroke.tool, color, stroke.thickness_scale)?;
    let _ = writeln!(
        out,
        "<!-- {} stroke, {} points -->",
        pen.name(),
        stroke.points.len()
    );

    let (r, g, b) = pen.base_color;
    let _ = write!(
        out,
        "<polyline style=\"fill:none;stroke:rgb({r}, {g}, {b});\
         stroke-width:{:.3};opacity:{}\" stroke-linecap=\"{}\" points=\"",
        pen.base_width,
        pen.stroke_opacity,
        pen.linecap().as_str()
    );

    let mut last: Option<(f64, f64)> = None;
    let mut last_width = 0.0;

    for (index, point) in stroke.points.iter().enumerate() {
        let (x, y) = transform.apply(point.x, point.y);
        check_in_canvas("x", x, transform.target_width())?;
        check_in_canvas("y", y, transform.target_height())?;
        let (x, y) = (x + margin, y + margin);

        if index % pen.segment_length() == 0 {
            let dynamics = Dynamics::at(point, last_width);
            let width = pen.segment_width(&dynamics);
            let opacity = pen.segment_opacity(&dynamics);
            let (r, g, b) = pen.segment_color(&dynamics);
            last_width = width;

            out.push_str("\"/>\n");
            let _ = write!(
                out,
                "<polyline style=\"fill:none;stroke:rgb({r}, {g}, {b});\
                 stroke-width:{width:.3};opacity:{opacity}\" \
                 stroke-linecap=\"{}\" points=\"",
                pen.linecap().as_str()
            );
            // carry the previous endpoint so segments stay contiguous
            if let Some((lx, ly)) = last {
                let _ = write!(out, "{lx:.3},{ly:.3} ");
            }
        }

        let _ = write!(out, "{x:.3},{y:.3} ");
        last = Some((x, y));
    }
    out.push_str("\"/>\n");
    Ok(())
}

fn draw_text(out: &mut String, paragraph: &TextParagraph, transform: &Transform, margin: f64) {
    let (xpos, ypos) = transform.apply(paragraph.pos_x, paragraph.pos_y);
    let (xpos, ypos) = (xpos + margin, ypos + margin);

    let mut content = String::new();
    let mut newlines = 0u32;

    for run in &paragraph.runs {
        let style_class = run.style.css_class();
        let mut indent = 0.0;

        if let Some(glyph) = run.marker.and_then(|m| m.marker_glyph()) {
            let _ = write!(
                content,
                "<tspan x='{xpos}' dy='{}em' class='{style_class}'>{glyph}</tspan>",
                newlines as f64 / 2.0
            );
            indent = MARKER_INDENT;
        }

        let mut started = false;
        for part in run.text.split('\n') {
            if started {
                newlines += 1;
            }
            if part.is_empty() {
                continue;
            }
            let dy = if indent > 0.0 {
                0.0
            } else {
                newlines as f64 / 2.0
            };
            if !started {
                started = true;
            } else {
                newlines += 1;
            }
            let _ = write!(
                content,
                "<tspan x='{}' dy='{dy}em' class='{style_class}'>{}</tspan>",
                xpos + indent,
                escape_xml(part)
            );
        }
    }

    if !content.is_empty() {
        let _ = writeln!(out, "<text x=\"{xpos}\" y=\"{ypos}\">{content}</text>");
    }
}

fn check_in_canvas(axis: &'static str, value: f64, bound: f64) -> Result<()> {
    if !(0.0..=bound).contains(&value) {
        return Err(Error::TransformOutOfBounds { axis, value, bound });
    }
    Ok(())
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>']) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;"),
    )
}
