//! Extracted highlight records and their in-memory artifacts.

use std::collections::BTreeSet;

use crate::color::Rgba;

/// Block index assigned to a page's aggregate vector output so it sorts
/// after every point and text highlight on the same page.
pub const DRAWING_BLOCK_INDEX: u32 = u32::MAX;

/// An extracted annotation attributed to a page.
#[derive(Debug, Clone)]
pub struct Highlight {
    /// Reference-document page index, -1 when unknown
    pub page_index: i32,

    /// Position of the source block in the page's block sequence;
    /// [`DRAWING_BLOCK_INDEX`] for aggregate vector output
    pub block_index: u32,

    /// Tags of the page the highlight came from
    pub tags: BTreeSet<String>,

    /// The extracted content
    pub content: HighlightContent,
}

impl Highlight {
    /// Ordering key: page first, then block position. Ties keep
    /// emission order under a stable sort.
    pub fn sort_key(&self) -> (i32, u32) {
        (self.page_index, self.block_index)
    }

    /// Check if this is the page's aggregate drawing.
    pub fn is_drawing(&self) -> bool {
        matches!(self.content, HighlightContent::Drawing { .. })
    }
}

/// Content payload of a highlight.
#[derive(Debug, Clone)]
pub enum HighlightContent {
    /// Extracted text with its resolved color
    Text {
        /// The selected text
        text: String,
        /// Resolved highlight color
        color: Rgba,
    },

    /// A cropped raster of a selected reference-page region
    Image {
        /// PNG artifact of the cropped region
        artifact: Artifact,
    },

    /// A vector trace of all non-cropped handwriting on the page
    Drawing {
        /// SVG artifact of the traced strokes
        artifact: Artifact,
    },
}

/// An in-memory output artifact: encoded bytes plus the file extension
/// the exporter should persist them under. The pipeline itself never
/// touches the filesystem.
#[derive(Debug, Clone)]
pub struct Artifact {
    /// Artifact encoding
    pub kind: ArtifactKind,

    /// Encoded bytes
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Suggested file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self.kind {
            ArtifactKind::Png => "png",
            ArtifactKind::Svg => "svg",
        }
    }
}

/// Encoding of an output artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A PNG raster crop
    Png,
    /// A standalone SVG document
    Svg,
}

/// Stably sort highlights by (page index, block index); a page's
/// drawing always lands after its text and image highlights.
pub fn sort_highlights(highlights: &mut [Highlight]) {
    highlights.sort_by_key(|h| h.sort_key());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_highlight(page: i32, block: u32) -> Highlight {
        Highlight {
            page_index: page,
            block_index: block,
            tags: BTreeSet::new(),
            content: HighlightContent::Text {
                text: format!("p{page}b{block}"),
                color: Rgba::new(0, 0, 0, 255),
            },
        }
    }

    fn drawing_highlight(page: i32) -> Highlight {
        Highlight {
            page_index: page,
            block_index: DRAWING_BLOCK_INDEX,
            tags: BTreeSet::new(),
            content: HighlightContent::Drawing {
                artifact: Artifact {
                    kind: ArtifactKind::Svg,
                    bytes: Vec::new(),
                },
            },
        }
    }

    #[test]
    fn test_drawing_sorts_after_text() {
        let mut highlights = vec![
            drawing_highlight(0),
            text_highlight(0, 2),
            text_highlight(0, 1),
        ];
        sort_highlights(&mut highlights);

        assert_eq!(highlights[0].block_index, 1);
        assert_eq!(highlights[1].block_index, 2);
        assert!(highlights[2].is_drawing());
    }

    #[test]
    fn test_pages_order_before_blocks() {
        let mut highlights = vec![
            text_highlight(1, 0),
            drawing_highlight(0),
            text_highlight(0, 5),
            text_highlight(-1, 0),
        ];
        sort_highlights(&mut highlights);

        assert_eq!(highlights[0].page_index, -1);
        assert_eq!(highlights[1].sort_key(), (0, 5));
        assert_eq!(highlights[2].sort_key(), (0, DRAWING_BLOCK_INDEX));
        assert_eq!(highlights[3].page_index, 1);
    }

    #[test]
    fn test_artifact_extension() {
        let png = Artifact {
            kind: ArtifactKind::Png,
            bytes: Vec::new(),
        };
        assert_eq!(png.extension(), "png");
    }
}
