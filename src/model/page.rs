//! Page-level types.

use super::Line;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Axis-aligned box in points, top-left origin (`top` grows downward).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Create a bounding box from its edges.
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Reading-order comparison: top first, then left.
    pub fn reading_cmp(&self, other: &BoundingBox) -> Ordering {
        self.top
            .total_cmp(&other.top)
            .then_with(|| self.left.total_cmp(&other.left))
    }
}

/// Type of a layout block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    /// Lines of text
    Text,
    /// Images and other non-text content (ignored by analysis)
    NonText,
}

/// A layout-level grouping of lines, or a piece of non-text content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Block type
    pub kind: BlockKind,

    /// Bounding box on the page
    pub bbox: BoundingBox,

    /// Lines in original order (always empty for non-text blocks)
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a text block.
    pub fn text(bbox: BoundingBox, lines: Vec<Line>) -> Self {
        Self {
            kind: BlockKind::Text,
            bbox,
            lines,
        }
    }

    /// Create a text block whose bounding box covers its lines.
    pub fn from_lines(lines: Vec<Line>) -> Self {
        let bbox = lines
            .iter()
            .filter_map(Line::bbox)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_default();
        Self::text(bbox, lines)
    }

    /// Create a non-text block.
    pub fn non_text(bbox: BoundingBox) -> Self {
        Self {
            kind: BlockKind::NonText,
            bbox,
            lines: Vec::new(),
        }
    }

    pub fn is_text(&self) -> bool {
        self.kind == BlockKind::Text
    }
}

/// A single page in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page index (0-based)
    pub index: usize,

    /// Page width in points (1 point = 1/72 inch)
    pub width: f32,

    /// Page height in points
    pub height: f32,

    /// Blocks in decoder order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create a new empty page with the given dimensions.
    pub fn new(index: usize, width: f32, height: f32) -> Self {
        Self {
            index,
            width,
            height,
            blocks: Vec::new(),
        }
    }

    /// Create a new page with standard Letter size (8.5 x 11 inches).
    pub fn letter(index: usize) -> Self {
        Self::new(index, 612.0, 792.0)
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder-style variant of [`Page::add_block`].
    pub fn with_block(mut self, block: Block) -> Self {
        self.add_block(block);
        self
    }

    /// Text blocks sorted by `(top, left)`.
    ///
    /// The sort is stable, so blocks at identical positions keep decoder order.
    pub fn text_blocks_in_reading_order(&self) -> Vec<&Block> {
        let mut blocks: Vec<&Block> = self.blocks.iter().filter(|b| b.is_text()).collect();
        blocks.sort_by(|a, b| a.bbox.reading_cmp(&b.bbox));
        blocks
    }

    /// Check if the page has no blocks.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
