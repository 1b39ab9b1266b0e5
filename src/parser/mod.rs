//! PDF decoding.
//!
//! Turns a PDF file into the [`Document`] layout tree. Everything lopdf
//! specific stays behind [`PdfBackend`].

mod backend;
mod layout;
mod options;
mod pdf_parser;

use std::path::Path;

pub use backend::{
    decode_text_simple, ContentOp, LopdfBackend, MediaBox, PageId, PdfBackend, PdfValue,
    DEFAULT_MEDIA_BOX,
};
pub use layout::LayoutAnalyzer;
pub use options::{DecodeOptions, ErrorMode};
pub use pdf_parser::PdfParser;

use crate::error::Result;
use crate::model::Document;

/// Open and decode a PDF file.
///
/// The underlying decoder is released before this returns, on success
/// and on failure.
pub fn open_document<P: AsRef<Path>>(path: P) -> Result<Document> {
    open_document_with_options(path, DecodeOptions::default())
}

/// Open and decode a PDF file with custom options.
pub fn open_document_with_options<P: AsRef<Path>>(
    path: P,
    options: DecodeOptions,
) -> Result<Document> {
    PdfParser::open_with_options(path, options)?.parse()
}

/// Decode a PDF held in memory.
pub fn decode_bytes(data: &[u8]) -> Result<Document> {
    PdfParser::from_bytes(data)?.parse()
}
