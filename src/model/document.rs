//! Scene document and page types.

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use super::Block;

/// Default canvas width for notebooks without zoom metadata.
pub const NOTEBOOK_WIDTH: f64 = 1620.0;

/// Default canvas height for notebooks without zoom metadata.
pub const NOTEBOOK_HEIGHT: f64 = 2160.0;

/// A decoded note document: ordered pages plus the page-id map of the
/// reference document it annotates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Human-readable document name
    #[serde(default)]
    pub name: String,

    /// Pages in device order
    #[serde(default)]
    pub pages: Vec<ScenePage>,

    /// Page id to reference-document page index. Ids absent here yield
    /// highlights with page index -1.
    #[serde(default)]
    pub page_map: HashMap<String, usize>,

    /// Zoom metadata for documents annotated over a reference page;
    /// absent for plain notebooks.
    #[serde(default)]
    pub zoom: Option<ZoomInfo>,
}

impl SceneDocument {
    /// Canvas width for this document's pages.
    pub fn canvas_width(&self) -> f64 {
        self.zoom.as_ref().map_or(NOTEBOOK_WIDTH, |z| z.page_width)
    }

    /// Canvas height for this document's pages.
    pub fn canvas_height(&self) -> f64 {
        self.zoom
            .as_ref()
            .map_or(NOTEBOOK_HEIGHT, |z| z.page_height)
    }

    /// Resolve the processing context for one page. Pages whose id is
    /// missing from the page map get index -1 rather than being dropped.
    pub fn page_context(&self, page: &ScenePage) -> PageContext {
        let index = self
            .page_map
            .get(&page.id)
            .map_or(-1, |&i| i as i32);
        let (center_x, center_y) = self
            .zoom
            .as_ref()
            .map_or((0.0, 0.0), |z| (z.center_x, z.center_y));
        PageContext {
            index,
            canvas_width: self.canvas_width(),
            canvas_height: self.canvas_height(),
            center_x,
            center_y,
            tags: page.tags.clone(),
        }
    }
}

/// One page of decoded blocks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenePage {
    /// Stable page id from the device
    pub id: String,

    /// Tags the user attached to this page
    #[serde(default)]
    pub tags: BTreeSet<String>,

    /// Decoded blocks in original order; block indices are positional
    #[serde(default)]
    pub blocks: Vec<Block>,
}

/// Zoom metadata carried by documents annotated over a reference page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoomInfo {
    /// Page width at the default zoom scale
    pub page_width: f64,

    /// Page height at the default zoom scale
    pub page_height: f64,

    /// Device zoom scale
    #[serde(default = "default_scale")]
    pub scale: f64,

    /// Zoom center x offset
    #[serde(default)]
    pub center_x: f64,

    /// Zoom center y offset
    #[serde(default)]
    pub center_y: f64,
}

fn default_scale() -> f64 {
    1.0
}

/// Per-page processing context, resolved once before classification and
/// immutable while the page is processed.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Reference-document page index, -1 when unknown
    pub index: i32,

    /// Nominal canvas width, tablet units
    pub canvas_width: f64,

    /// Nominal canvas height, tablet units
    pub canvas_height: f64,

    /// Zoom center x offset
    pub center_x: f64,

    /// Zoom center y offset
    pub center_y: f64,

    /// Tags attached to the page, copied onto every highlight
    pub tags: BTreeSet<String>,
}
