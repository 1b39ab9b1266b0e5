//! # pdfoutline
//!
//! Title and heading outline inference for PDF documents.
//!
//! PDFs rarely carry a usable structure tree. This library decodes the page
//! layout (spans, lines, blocks) and infers a title plus an H1/H2/H3 outline
//! from typography alone: which font sizes dominate the document, which
//! lines are bold, and a handful of well-known section names.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfoutline::{extract_file, render};
//!
//! fn main() -> pdfoutline::Result<()> {
//!     let result = extract_file("paper.pdf")?;
//!     println!("{}", render::to_json(&result, render::JsonFormat::Pretty)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Layers
//!
//! - [`parser`] decodes a PDF into a [`Document`] layout tree
//! - [`analysis`] infers the outline from that tree, with no I/O
//! - [`render`] serializes an [`OutlineResult`] as JSON
//! - [`batch`] runs the whole pipeline over a directory, in parallel

pub mod analysis;
pub mod batch;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{ExtractedOutline, HeuristicOptions, OutlineExtractor, Thresholds};
pub use batch::{process_directory, title_from_path, BatchOptions, BatchSummary};
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_pdf, PdfFormat};
pub use error::{Error, Result};
pub use model::{Document, HeadingLevel, OutlineEntry, OutlineResult};
pub use parser::{DecodeOptions, ErrorMode, PdfParser};
pub use render::JsonFormat;

use std::path::Path;

/// Infer the title and outline of an already decoded document.
///
/// `fallback_title` is used only when no title can be detected.
///
/// # Example
///
/// ```
/// use pdfoutline::{extract_outline, Document};
///
/// let result = extract_outline(&Document::new(), "Untitled");
/// assert_eq!(result.title, "Untitled");
/// assert!(result.outline.is_empty());
/// ```
pub fn extract_outline(doc: &Document, fallback_title: impl Into<String>) -> OutlineResult {
    OutlineExtractor::new()
        .extract(doc)
        .with_fallback_title(|| fallback_title.into())
}

/// Open a PDF file and infer its title and outline.
///
/// When no title is detected the file name is used, title-cased.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::extract_file;
///
/// let result = extract_file("report.pdf").unwrap();
/// for entry in &result.outline {
///     println!("{} {} (page {})", entry.level, entry.text, entry.page);
/// }
/// ```
pub fn extract_file<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_file_with(path, &OutlineExtractor::new(), DecodeOptions::default())
}

/// Open a PDF file and run a configured extractor over it.
pub fn extract_file_with<P: AsRef<Path>>(
    path: P,
    extractor: &OutlineExtractor,
    options: DecodeOptions,
) -> Result<OutlineResult> {
    let path = path.as_ref();
    let doc = parser::open_document_with_options(path, options)?;
    Ok(extractor
        .extract(&doc)
        .with_fallback_title(|| title_from_path(path)))
}

/// Builder for configuring outline extraction.
///
/// # Example
///
/// ```no_run
/// use pdfoutline::{HeuristicOptions, PdfOutline};
///
/// let result = PdfOutline::new()
///     .lenient()
///     .with_heuristics(HeuristicOptions::new().with_body_max(11))
///     .extract("report.pdf")?;
/// # Ok::<(), pdfoutline::Error>(())
/// ```
pub struct PdfOutline {
    decode_options: DecodeOptions,
    extractor: OutlineExtractor,
}

impl PdfOutline {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self {
            decode_options: DecodeOptions::default(),
            extractor: OutlineExtractor::new(),
        }
    }

    /// Enable lenient decoding (undecodable pages are left empty).
    pub fn lenient(mut self) -> Self {
        self.decode_options = self.decode_options.lenient();
        self
    }

    /// Set decode options.
    pub fn with_decode_options(mut self, options: DecodeOptions) -> Self {
        self.decode_options = options;
        self
    }

    /// Set heuristic options.
    pub fn with_heuristics(mut self, options: HeuristicOptions) -> Self {
        self.extractor = OutlineExtractor::with_options(options);
        self
    }

    /// Extract from a PDF file, falling back to the file name for the title.
    pub fn extract<P: AsRef<Path>>(&self, path: P) -> Result<OutlineResult> {
        extract_file_with(path, &self.extractor, self.decode_options.clone())
    }

    /// Extract from PDF bytes.
    pub fn extract_bytes(&self, data: &[u8], fallback_title: &str) -> Result<OutlineResult> {
        let parser = PdfParser::from_bytes_with_options(data, self.decode_options.clone())?;
        let doc = parser.parse()?;
        Ok(self
            .extractor
            .extract(&doc)
            .with_fallback_title(|| fallback_title.to_string()))
    }
}

impl Default for PdfOutline {
    fn default() -> Self {
        Self::new()
    }
}
