//! PDF document parser using lopdf.

use std::io::Read;
use std::path::Path;

use crate::detect::detect_format_from_path;
use crate::error::{Error, Result};
use crate::model::{Document, Page};

use super::backend::{LopdfBackend, PdfBackend, DEFAULT_MEDIA_BOX};
use super::layout::LayoutAnalyzer;
use super::options::{DecodeOptions, ErrorMode};

/// Decodes a PDF into the layout tree consumed by outline analysis.
pub struct PdfParser {
    backend: LopdfBackend,
    options: DecodeOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, DecodeOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: DecodeOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it's a PDF
        let format = detect_format_from_path(path)?;
        log::debug!("Opening {} ({})", path.display(), format);

        let backend = LopdfBackend::load_file(path)?;
        Self::with_backend(backend, options)
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, DecodeOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: DecodeOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Self::with_backend(backend, options)
    }

    /// Parse a PDF from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn with_backend(backend: LopdfBackend, options: DecodeOptions) -> Result<Self> {
        if backend.is_encrypted() {
            log::warn!("Document is encrypted; text may not decode");
        }
        Ok(Self { backend, options })
    }

    /// Decode every page into a [`Document`].
    pub fn parse(&self) -> Result<Document> {
        let analyzer = LayoutAnalyzer::new(&self.backend);
        let mut document = Document::new();

        for (index, (page_num, page_id)) in self.backend.pages().into_iter().enumerate() {
            match analyzer.analyze_page(index, page_id) {
                Ok(page) => document.add_page(page),
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Failed to decode page {}: {}", page_num, e);
                    let media_box = self
                        .backend
                        .page_media_box(page_id)
                        .unwrap_or(DEFAULT_MEDIA_BOX);
                    document.add_page(Page::new(index, media_box.width(), media_box.height()));
                }
                Err(e) => {
                    return Err(Error::Corrupted(format!("Page {}: {}", page_num, e)));
                }
            }
        }

        Ok(document)
    }

    /// Decode a single page by its 1-based number.
    pub fn parse_page(&self, page_number: u32) -> Result<Page> {
        let pages = self.backend.pages();
        let page_id = pages
            .get(&page_number)
            .ok_or(Error::PageOutOfRange(page_number, pages.len() as u32))?;
        let index = page_number.saturating_sub(1) as usize;
        LayoutAnalyzer::new(&self.backend).analyze_page(index, *page_id)
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.pages().len() as u32
    }

    /// Check if the document is encrypted.
    pub fn is_encrypted(&self) -> bool {
        self.backend.is_encrypted()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}
