//! End-to-end extraction tests over decoded scene documents.

use std::collections::BTreeSet;

use unink::geom::Bounds;
use unink::{
    Block, Error, ExtractOptions, Extractor, Highlight, HighlightContent, InkItem, InkStroke,
    Point, Raster, ReferenceDocument, Rgba, SceneDocument, ScenePage, WordBox,
    DRAWING_BLOCK_INDEX,
};

/// Reference document backed by a blank white raster.
struct MockReference {
    width: u32,
    height: u32,
    words: Vec<WordBox>,
}

impl MockReference {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            words: Vec::new(),
        }
    }

    fn with_words(mut self, words: Vec<WordBox>) -> Self {
        self.words = words;
        self
    }
}

impl ReferenceDocument for MockReference {
    fn page_count(&self) -> usize {
        1
    }

    fn render_page(&self, _page_index: usize, _dpi: u32) -> unink::Result<Raster> {
        Ok(Raster::from_pixel(
            self.width,
            self.height,
            image::Rgba([255, 255, 255, 255]),
        ))
    }

    fn words_in_rect(&self, _page_index: usize, _rect: &Bounds) -> Vec<WordBox> {
        self.words.clone()
    }
}

fn ink_block(tool: u8, color: u8, points: Vec<Point>) -> Block {
    Block::Line(InkItem {
        deleted_length: 0,
        extra_data: Vec::new(),
        value: Some(InkStroke {
            tool,
            color,
            thickness_scale: 2.0,
            points,
            text: None,
        }),
    })
}

fn glyph_with_text(text: &str, extra_data: Vec<u8>) -> Block {
    Block::Glyph(InkItem {
        deleted_length: 0,
        extra_data,
        value: Some(InkStroke {
            tool: 5,
            color: 9,
            thickness_scale: 1.0,
            points: Vec::new(),
            text: Some(text.to_string()),
        }),
    })
}

fn rect_points() -> Vec<Point> {
    vec![
        Point::new(-200.0, 100.0),
        Point::new(200.0, 100.0),
        Point::new(200.0, 300.0),
        Point::new(-200.0, 300.0),
    ]
}

fn one_page_doc(blocks: Vec<Block>) -> SceneDocument {
    let mut doc = SceneDocument {
        name: "test".to_string(),
        ..Default::default()
    };
    doc.page_map.insert("p1".to_string(), 0);
    doc.pages.push(ScenePage {
        id: "p1".to_string(),
        tags: BTreeSet::new(),
        blocks,
    });
    doc
}

#[test]
fn test_glyph_text_highlight() {
    // raw payload tail is (b, g, r, a)
    let mut doc = one_page_doc(vec![glyph_with_text(
        "Important",
        vec![0xa4, 0x01, 0x00, 57, 62, 179, 255],
    )]);
    doc.pages[0].tags.insert("chapter-1".to_string());

    let highlights = unink::extract(&doc).unwrap();
    assert_eq!(highlights.len(), 1);

    let highlight = &highlights[0];
    assert_eq!(highlight.page_index, 0);
    assert_eq!(highlight.block_index, 0);
    assert!(highlight.tags.contains("chapter-1"));
    match &highlight.content {
        HighlightContent::Text { text, color } => {
            assert_eq!(text, "Important");
            assert_eq!(*color, Rgba::new(179, 62, 57, 255));
        }
        other => panic!("expected text highlight, got {other:?}"),
    }
}

#[test]
fn test_rectangular_stroke_is_cropped() {
    let doc = one_page_doc(vec![ink_block(4, 0, rect_points())]);
    let reference = MockReference::new(800, 1000);

    let highlights = Extractor::new()
        .with_reference(&reference)
        .extract(&doc)
        .unwrap();

    assert_eq!(highlights.len(), 1);
    assert!(!highlights[0].is_drawing());
    match &highlights[0].content {
        HighlightContent::Image { artifact } => {
            assert_eq!(artifact.extension(), "png");
            assert_eq!(&artifact.bytes[..4], &[0x89, b'P', b'N', b'G']);
        }
        other => panic!("expected image highlight, got {other:?}"),
    }
}

#[test]
fn test_cropping_disabled_yields_drawing() {
    let doc = one_page_doc(vec![ink_block(4, 0, rect_points())]);
    let reference = MockReference::new(800, 1000);

    let highlights = Extractor::with_options(ExtractOptions::new().with_cropping(false))
        .with_reference(&reference)
        .extract(&doc)
        .unwrap();

    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].block_index, DRAWING_BLOCK_INDEX);
    match &highlights[0].content {
        HighlightContent::Drawing { artifact } => {
            let svg = String::from_utf8(artifact.bytes.clone()).unwrap();
            // the reference raster is embedded, keeping the SVG standalone
            assert!(svg.contains("data:image/png;base64,"));
        }
        other => panic!("expected drawing highlight, got {other:?}"),
    }
}

#[test]
fn test_snap_to_text_refines_crop() {
    let words = vec![
        WordBox {
            x_min: 100.0,
            y_min: 60.0,
            x_max: 150.0,
            y_max: 70.0,
        },
        WordBox {
            x_min: 200.0,
            y_min: 60.0,
            x_max: 400.0,
            y_max: 90.0,
        },
    ];
    let doc = one_page_doc(vec![ink_block(4, 0, rect_points())]);
    let reference = MockReference::new(800, 1000).with_words(words);

    let highlights = Extractor::new()
        .with_reference(&reference)
        .extract(&doc)
        .unwrap();

    let HighlightContent::Image { artifact } = &highlights[0].content else {
        panic!("expected image highlight");
    };
    let decoded = image::load_from_memory(&artifact.bytes).unwrap();
    // word union (100,60)-(400,90) expanded by the 3px snap margin
    assert_eq!(decoded.width(), 306);
    assert_eq!(decoded.height(), 36);
}

#[test]
fn test_unmapped_page_degrades_to_drawing() {
    let mut doc = one_page_doc(vec![ink_block(4, 0, rect_points())]);
    doc.page_map.clear();
    let reference = MockReference::new(800, 1000);

    let highlights = Extractor::new()
        .with_reference(&reference)
        .extract(&doc)
        .unwrap();

    // no raster is available for an unmapped page, so the selection is
    // traced instead of dropped
    assert_eq!(highlights.len(), 1);
    assert_eq!(highlights[0].page_index, -1);
    assert!(highlights[0].is_drawing());
}

#[test]
fn test_empty_page_yields_nothing() {
    let doc = one_page_doc(Vec::new());
    let highlights = unink::extract(&doc).unwrap();
    assert!(highlights.is_empty());
}

#[test]
fn test_skipped_blocks() {
    let deleted = Block::Line(InkItem {
        deleted_length: 3,
        extra_data: Vec::new(),
        value: Some(InkStroke {
            tool: 4,
            color: 0,
            thickness_scale: 1.0,
            points: rect_points(),
            text: None,
        }),
    });
    let no_payload = Block::Line(InkItem {
        deleted_length: 0,
        extra_data: Vec::new(),
        value: None,
    });
    let unreadable = Block::Unreadable {
        message: "truncated".to_string(),
    };

    let doc = one_page_doc(vec![deleted, no_payload, unreadable]);
    let highlights = unink::extract(&doc).unwrap();
    assert!(highlights.is_empty());
}

#[test]
fn test_ordering_across_pages_and_blocks() {
    let mut doc = SceneDocument::default();
    doc.page_map.insert("a".to_string(), 1);
    doc.page_map.insert("b".to_string(), 0);
    doc.pages.push(ScenePage {
        id: "a".to_string(),
        tags: BTreeSet::new(),
        blocks: vec![
            glyph_with_text("on page one", vec![0, 0, 0, 0, 0, 0, 255]),
            ink_block(
                4,
                0,
                vec![
                    Point::new(0.0, 0.0),
                    Point::new(10.0, 20.0),
                    Point::new(30.0, 5.0),
                ],
            ),
        ],
    });
    doc.pages.push(ScenePage {
        id: "b".to_string(),
        tags: BTreeSet::new(),
        blocks: vec![glyph_with_text("on page zero", vec![0, 0, 0, 0, 0, 0, 255])],
    });

    let highlights = unink::extract(&doc).unwrap();
    assert_eq!(highlights.len(), 3);

    let keys: Vec<(i32, u32)> = highlights.iter().map(Highlight::sort_key).collect();
    assert_eq!(keys[0], (0, 0));
    assert_eq!(keys[1], (1, 0));
    assert_eq!(keys[2], (1, DRAWING_BLOCK_INDEX));
    assert!(highlights[2].is_drawing());
}

#[test]
fn test_canvas_widens_to_content() {
    // two free-form strokes more than one canvas-width apart
    let doc = one_page_doc(vec![
        ink_block(
            4,
            0,
            vec![
                Point::new(-2000.0, 100.0),
                Point::new(-1950.0, 150.0),
                Point::new(-1900.0, 120.0),
            ],
        ),
        ink_block(
            4,
            0,
            vec![
                Point::new(1900.0, 100.0),
                Point::new(1950.0, 180.0),
                Point::new(2000.0, 200.0),
            ],
        ),
    ]);

    let highlights = unink::extract(&doc).unwrap();
    assert_eq!(highlights.len(), 1);
    let HighlightContent::Drawing { artifact } = &highlights[0].content else {
        panic!("expected drawing highlight");
    };
    let svg = String::from_utf8(artifact.bytes.clone()).unwrap();
    // canvas width equals ceil(x_max - x_min) once content outgrows the
    // default canvas
    assert!(svg.contains("width=\"4000\""));
}

#[test]
fn test_unknown_color_propagates() {
    let doc = one_page_doc(vec![ink_block(4, 99, rect_points())]);
    let result = unink::extract(&doc);
    assert!(matches!(result, Err(Error::UnknownColor(99))));
}

#[test]
fn test_unknown_tool_propagates() {
    let doc = one_page_doc(vec![ink_block(
        77,
        0,
        vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)],
    )]);
    let result = unink::extract(&doc);
    assert!(matches!(result, Err(Error::UnknownTool(77))));
}

#[test]
fn test_sequential_matches_parallel() {
    let doc = one_page_doc(vec![
        glyph_with_text("note", vec![0, 0, 10, 20, 30, 40, 250]),
        ink_block(
            4,
            0,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 20.0),
                Point::new(30.0, 5.0),
            ],
        ),
    ]);

    let parallel = unink::extract(&doc).unwrap();
    let sequential =
        unink::extract_with_options(&doc, ExtractOptions::new().sequential()).unwrap();

    assert_eq!(parallel.len(), sequential.len());
    for (a, b) in parallel.iter().zip(sequential.iter()) {
        assert_eq!(a.sort_key(), b.sort_key());
    }
}
