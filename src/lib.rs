//! # unink
//!
//! Extraction of durable highlights from decoded handwritten-note
//! scenes captured on a pen-input tablet.
//!
//! A decoded scene is a per-page stream of typed blocks: pen strokes,
//! highlight glyphs, and typed text paragraphs. This library classifies
//! each block and turns a document into three kinds of artifacts:
//!
//! - **Text highlights**: selected text with its resolved color and the
//!   page's tags
//! - **Image highlights**: PNG crops of rectangular selections drawn
//!   over a reference document page
//! - **Drawing highlights**: standalone SVG renderings of free-form
//!   handwriting, with tool-specific physical ink models
//!
//! ## Quick Start
//!
//! ```no_run
//! use unink::{Extractor, SceneDocument};
//!
//! fn main() -> unink::Result<()> {
//!     let json = std::fs::read_to_string("scene.json")?;
//!     let doc: SceneDocument = serde_json::from_str(&json).map_err(unink::Error::from)?;
//!
//!     let highlights = Extractor::new().extract(&doc)?;
//!     for highlight in &highlights {
//!         println!("page {} block {}", highlight.page_index, highlight.block_index);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Pen physics**: eight tool families with reverse-engineered
//!   width/opacity/color dynamics
//! - **Canvas fitting**: iterative widening transform from tablet space
//!   into page space, optionally aligned to a rasterized reference page
//! - **In-memory artifacts**: the pipeline hands encoded bytes up the
//!   call chain; only the exporter touches the filesystem
//! - **Parallel pages**: pages are independent and processed with Rayon

pub mod color;
pub mod error;
pub mod extract;
pub mod geom;
pub mod model;
pub mod pen;
pub mod refdoc;
pub mod render;
pub mod transform;

// Re-export commonly used types
pub use color::{palette_color, resolve_color, Rgba};
pub use error::{Error, Result};
pub use extract::{ExtractOptions, Extractor, RunContext};
pub use model::{
    sort_highlights, Artifact, ArtifactKind, Block, Highlight, HighlightContent, InkItem,
    InkStroke, PageContext, ParagraphStyle, Point, SceneDocument, ScenePage, TextParagraph,
    TextRun, ZoomInfo, DRAWING_BLOCK_INDEX,
};
pub use pen::{Dynamics, Linecap, Pen, Tool};
pub use refdoc::{Raster, ReferenceDocument, WordBox};
pub use transform::Transform;

/// Extract every highlight in a document with default options and no
/// reference document.
///
/// # Example
///
/// ```no_run
/// use unink::SceneDocument;
///
/// let doc: SceneDocument = serde_json::from_str("{}").unwrap();
/// let highlights = unink::extract(&doc).unwrap();
/// println!("{} highlights", highlights.len());
/// ```
pub fn extract(doc: &SceneDocument) -> Result<Vec<Highlight>> {
    Extractor::new().extract(doc)
}

/// Extract with custom options.
///
/// # Example
///
/// ```no_run
/// use unink::{extract_with_options, ExtractOptions, SceneDocument};
///
/// let doc: SceneDocument = serde_json::from_str("{}").unwrap();
/// let options = ExtractOptions::new().with_cropping(false).sequential();
/// let highlights = extract_with_options(&doc, options).unwrap();
/// ```
pub fn extract_with_options(doc: &SceneDocument, options: ExtractOptions) -> Result<Vec<Highlight>> {
    Extractor::with_options(options).extract(doc)
}
