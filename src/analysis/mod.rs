//! Outline inference from typography.
//!
//! The pipeline runs in one direction:
//!
//! 1. [`FontSizeHistogram`] weighs every font size by how much text uses it.
//! 2. [`Thresholds`] turns the most used large sizes into H1/H2/H3 minimums.
//! 3. [`TitleDetector`] looks for the most prominent text on the first pages.
//! 4. [`HeadingClassifier`] filters lines and assigns levels.
//! 5. [`OutlineBuilder`] walks the document in reading order and collects entries.
//!
//! Nothing here performs I/O or keeps state between documents.

mod builder;
mod classifier;
mod fonts;
mod options;
mod thresholds;
mod title;

pub use builder::{OutlineAccumulator, OutlineBuilder};
pub use classifier::{HeadingClassifier, KeywordRule, LineStyle, Rejection, SizeCondition};
pub use fonts::FontSizeHistogram;
pub use options::{HeuristicOptions, ThresholdDefaults};
pub use thresholds::Thresholds;
pub use title::{TitleCandidate, TitleDetector};

use crate::model::{Document, OutlineEntry, OutlineResult};

/// Result of analyzing one document, before a fallback title is applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedOutline {
    /// Detected title, if any
    pub title: Option<String>,

    /// Headings in reading order
    pub outline: Vec<OutlineEntry>,

    /// Thresholds used for classification
    pub thresholds: Thresholds,
}

impl ExtractedOutline {
    /// Produce the final result, calling `fallback` only when no title was found.
    pub fn with_fallback_title<F>(self, fallback: F) -> OutlineResult
    where
        F: FnOnce() -> String,
    {
        OutlineResult {
            title: self.title.unwrap_or_else(fallback),
            outline: self.outline,
        }
    }
}

/// Runs the full inference pipeline.
///
/// The extractor holds only configuration and compiled patterns, so one
/// instance can be shared across threads and documents.
#[derive(Debug, Clone)]
pub struct OutlineExtractor {
    options: HeuristicOptions,
    title_detector: TitleDetector,
}

impl OutlineExtractor {
    /// Create an extractor with default heuristics.
    pub fn new() -> Self {
        Self::with_options(HeuristicOptions::default())
    }

    /// Create an extractor with custom heuristics.
    pub fn with_options(options: HeuristicOptions) -> Self {
        let title_detector = TitleDetector::new(&options);
        Self {
            options,
            title_detector,
        }
    }

    pub fn options(&self) -> &HeuristicOptions {
        &self.options
    }

    /// Histogram and thresholds for a document.
    pub fn thresholds(&self, doc: &Document) -> Thresholds {
        let histogram = FontSizeHistogram::from_document(doc, self.options.noise_floor);
        Thresholds::compute(&histogram, self.options.body_max, self.options.defaults)
    }

    /// Analyze a document.
    pub fn extract(&self, doc: &Document) -> ExtractedOutline {
        let thresholds = self.thresholds(doc);
        let title = self.title_detector.detect(doc, thresholds.h1);

        let classifier = HeadingClassifier::new(thresholds, &self.options);
        let outline = OutlineBuilder::new(&classifier).build(doc);

        log::debug!(
            "Extracted {} headings from {} pages (title found: {})",
            outline.len(),
            doc.page_count(),
            title.is_some()
        );

        ExtractedOutline {
            title,
            outline,
            thresholds,
        }
    }
}

impl Default for OutlineExtractor {
    fn default() -> Self {
        Self::new()
    }
}
