//! Data model for decoded scene content and extracted highlights.
//!
//! Input types (blocks, pages, documents) mirror what the upstream
//! scene decoder emits and are serde-derived so a pre-decoded scene can
//! cross the CLI boundary as JSON. Output types (highlights, artifacts)
//! are plain in-memory values handed to the exporter.

mod block;
mod document;
mod highlight;

pub use block::{Block, InkItem, InkStroke, ParagraphStyle, Point, TextParagraph, TextRun};
pub use document::{
    PageContext, SceneDocument, ScenePage, ZoomInfo, NOTEBOOK_HEIGHT, NOTEBOOK_WIDTH,
};
pub use highlight::{
    sort_highlights, Artifact, ArtifactKind, Highlight, HighlightContent, DRAWING_BLOCK_INDEX,
};
