//! PDF format detection.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF header information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfFormat {
    /// PDF version (e.g., "1.7", "2.0")
    pub version: String,
    /// Bytes preceding the `%PDF-` marker
    pub offset: usize,
}

impl std::fmt::Display for PdfFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PDF {}", self.version)
    }
}

const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Readers accept a header anywhere in the first kilobyte.
const HEADER_SEARCH_LIMIT: usize = 1024;

/// Detect PDF format from a file path.
///
/// # Example
/// ```no_run
/// use pdfoutline::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("report.pdf").unwrap();
/// println!("PDF version: {}", format.version);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<PdfFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_SEARCH_LIMIT);
    file.take(HEADER_SEARCH_LIMIT as u64).read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect PDF format from the leading bytes of a file.
///
/// Returns `Error::UnknownFormat` when no `%PDF-` marker is found and
/// `Error::UnsupportedVersion` when the marker is followed by garbage.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<PdfFormat> {
    let window = &data[..data.len().min(HEADER_SEARCH_LIMIT)];
    let offset = window
        .windows(PDF_MAGIC.len())
        .position(|w| w == PDF_MAGIC)
        .ok_or(Error::UnknownFormat)?;

    let start = offset + PDF_MAGIC.len();
    let version_bytes = data
        .get(start..start + VERSION_LEN)
        .ok_or(Error::UnknownFormat)?;
    let version = String::from_utf8_lossy(version_bytes).to_string();

    if !is_valid_version(&version) {
        return Err(Error::UnsupportedVersion(version));
    }

    Ok(PdfFormat { version, offset })
}

/// Check for a `digit.digit` version string.
fn is_valid_version(version: &str) -> bool {
    matches!(
        version.as_bytes(),
        [major, b'.', minor] if major.is_ascii_digit() && minor.is_ascii_digit()
    )
}

/// Check if a file starts like a PDF.
pub fn is_pdf<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}
