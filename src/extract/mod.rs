//! Block classification and highlight extraction.
//!
//! One pass per page: every block is classified in original order and
//! routed to text-highlight recording, raster-crop extraction, or
//! vector-trace accumulation. Pages are independent, so the document
//! walk can run in parallel; the aggregate highlight list is re-sorted
//! by (page index, block index) before it is returned.

mod options;

pub use options::ExtractOptions;

use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::color::{resolve_color, Rgba};
use crate::error::{Error, Result};
use crate::geom;
use crate::model::{
    sort_highlights, Block, Highlight, HighlightContent, InkStroke, PageContext, SceneDocument,
    DRAWING_BLOCK_INDEX,
};
use crate::refdoc::{Raster, ReferenceDocument};
use crate::render::{compose_svg, crop_region, Trace};
use crate::transform;

/// Margin added around snapped word boxes, raster pixels.
const SNAP_MARGIN: f64 = 3.0;

/// State shared across one extraction run. Holds the one-shot flags
/// that must not live in process-wide mutable state.
pub struct RunContext {
    mixed_layout_warned: AtomicBool,
}

impl RunContext {
    /// Create a fresh run context.
    pub fn new() -> Self {
        Self {
            mixed_layout_warned: AtomicBool::new(false),
        }
    }

    /// Warn once per run that a page mixes typed text and handwriting.
    /// Text anchors use a different coordinate origin than stroke
    /// points, so mixed pages can drift.
    fn warn_mixed_layout(&self) {
        if !self.mixed_layout_warned.swap(true, Ordering::Relaxed) {
            log::warn!(
                "page mixes typed text and handwriting; text anchors use a \
                 different coordinate origin and may drift"
            );
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// The highlight extractor: options plus an optional reference-document
/// backend for cropping and backgrounds.
pub struct Extractor<'a> {
    options: ExtractOptions,
    reference: Option<&'a dyn ReferenceDocument>,
}

impl<'a> Extractor<'a> {
    /// Create an extractor with default options and no reference
    /// document.
    pub fn new() -> Self {
        Self::with_options(ExtractOptions::default())
    }

    /// Create an extractor with the given options.
    pub fn with_options(options: ExtractOptions) -> Self {
        Self {
            options,
            reference: None,
        }
    }

    /// Attach the reference document the note annotates.
    pub fn with_reference(mut self, reference: &'a dyn ReferenceDocument) -> Self {
        self.reference = Some(reference);
        self
    }

    /// The extractor's options.
    pub fn options(&self) -> &ExtractOptions {
        &self.options
    }

    /// Extract every highlight in the document, ordered by (page index,
    /// block index).
    pub fn extract(&self, doc: &SceneDocument) -> Result<Vec<Highlight>> {
        let run = RunContext::new();

        let per_page: Result<Vec<Vec<Highlight>>> = if self.options.parallel {
            doc.pages
                .par_iter()
                .map(|page| self.extract_page(&doc.page_context(page), &page.blocks, &run))
                .collect()
        } else {
            doc.pages
                .iter()
                .map(|page| self.extract_page(&doc.page_context(page), &page.blocks, &run))
                .collect()
        };

        let mut highlights: Vec<Highlight> = per_page?.into_iter().flatten().collect();
        sort_highlights(&mut highlights);
        Ok(highlights)
    }

    /// Extract one page's highlights. Transform failures are page-scoped:
    /// the page keeps its text highlights and contributes no drawing.
    pub fn extract_page(
        &self,
        ctx: &PageContext,
        blocks: &[Block],
        run: &RunContext,
    ) -> Result<Vec<Highlight>> {
        let mut highlights: Vec<Highlight> = Vec::new();
        let mut crops: Vec<(u32, &InkStroke, Rgba)> = Vec::new();
        let mut traces: Vec<Trace<'_>> = Vec::new();

        // cropping needs a reference raster for this specific page
        let reference = if ctx.index >= 0 { self.reference } else { None };
        let can_crop = self.options.crop_images && reference.is_some();

        for (index, block) in blocks.iter().enumerate() {
            match block {
                Block::Unreadable { message } => {
                    log::error!("page {}: unreadable block {index}: {message}", ctx.index);
                }
                Block::Text(paragraph) => traces.push(Trace::Text(paragraph)),
                Block::Line(item) | Block::Glyph(item) => {
                    if item.deleted_length > 0 {
                        continue;
                    }
                    let Some(stroke) = item.value.as_ref() else {
                        continue;
                    };

                    if item.is_highlight() {
                        let color = resolve_color(item)?;
                        let text = stroke.text.clone().unwrap_or_default();
                        highlights.push(Highlight {
                            page_index: ctx.index,
                            block_index: index as u32,
                            tags: ctx.tags.clone(),
                            content: HighlightContent::Text { text, color },
                        });
                        continue;
                    }

                    if !item.is_handwriting() {
                        continue;
                    }

                    let color = resolve_color(item)?;
                    if can_crop
                        && geom::is_rectangular(&stroke.points, self.options.rectangle_threshold)
                    {
                        crops.push((index as u32, stroke, color));
                    } else {
                        traces.push(Trace::Ink { stroke, color });
                    }
                }
            }
        }

        if crops.is_empty() && traces.is_empty() {
            return Ok(highlights);
        }

        let has_text = traces.iter().any(|t| matches!(t, Trace::Text(_)));
        let has_ink = traces.iter().any(|t| matches!(t, Trace::Ink { .. }));
        if has_text && has_ink {
            run.warn_mixed_layout();
        }

        let raster = match reference {
            Some(doc) => Some(doc.render_page(ctx.index as usize, self.options.dpi)?),
            None => None,
        };

        let transform = match transform::fit_page(
            blocks,
            ctx.canvas_width,
            ctx.canvas_height,
            raster.as_ref().map(|r| r.dimensions()),
        ) {
            Ok(t) => t,
            Err(err @ (Error::NoGeometry | Error::TransformDidNotConverge(_))) => {
                log::warn!("page {}: skipping drawing output: {err}", ctx.index);
                return Ok(highlights);
            }
            Err(err) => return Err(err),
        };

        if let Some(page_raster) = raster.as_ref() {
            for &(index, stroke, _) in &crops {
                let Some(bounds) = geom::point_bounds(&stroke.points) else {
                    continue;
                };
                let mut rect = transform.apply_bounds(&bounds);
                if self.options.snap_to_text {
                    if let Some(doc) = reference {
                        rect = snap_to_words(doc, ctx.index as usize, &rect, page_raster);
                    }
                }
                let artifact = crop_region(page_raster, &rect)?;
                highlights.push(Highlight {
                    page_index: ctx.index,
                    block_index: index,
                    tags: ctx.tags.clone(),
                    content: HighlightContent::Image { artifact },
                });
            }
        } else {
            // cropping without a raster degrades to tracing; a selection
            // is never dropped
            for (_, stroke, color) in crops {
                traces.push(Trace::Ink { stroke, color });
            }
        }

        if !traces.is_empty() {
            let artifact =
                compose_svg(&traces, &transform, raster.as_ref(), self.options.margin)?;
            highlights.push(Highlight {
                page_index: ctx.index,
                block_index: DRAWING_BLOCK_INDEX,
                tags: ctx.tags.clone(),
                content: HighlightContent::Drawing { artifact },
            });
        }

        Ok(highlights)
    }
}

impl Default for Extractor<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Refine a crop rectangle to the union of the word boxes it
/// intersects, with a small margin. Leaves the rectangle unchanged when
/// no words intersect.
fn snap_to_words(
    doc: &dyn ReferenceDocument,
    page_index: usize,
    rect: &geom::Bounds,
    raster: &Raster,
) -> geom::Bounds {
    let words = doc.words_in_rect(page_index, rect);
    let Some(first) = words.first() else {
        return *rect;
    };

    let mut union = first.bounds();
    for word in &words[1..] {
        union.x_min = union.x_min.min(word.x_min);
        union.y_min = union.y_min.min(word.y_min);
        union.x_max = union.x_max.max(word.x_max);
        union.y_max = union.y_max.max(word.y_max);
    }
    let (width, height) = raster.dimensions();
    union.expand_clamped(SNAP_MARGIN, width as f64, height as f64)
}
