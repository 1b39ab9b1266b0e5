//! Document model types.
//!
//! This module defines the read-only layout tree (pages, blocks, lines, spans)
//! that the decoder produces and the analysis consumes, plus the outline
//! types that analysis produces. Every value here is built fresh per document.

mod document;
mod outline;
mod page;
mod text;

pub use document::Document;
pub use outline::{HeadingLevel, OutlineEntry, OutlineResult};
pub use page::{Block, BlockKind, BoundingBox, Page};
pub use text::{round_font_size, Line, Span};
