//! Span and line types.

use super::BoundingBox;
use serde::{Deserialize, Serialize};

/// Font-name fragments that mark a span as bold.
const BOLD_MARKERS: [&str; 4] = ["bold", "black", "heavy", "demi"];

/// Round a font size to integer points.
///
/// Ties go to the even neighbour (12.5 -> 12, 13.5 -> 14). Non-positive and
/// non-finite sizes become 0, which analysis treats as "no size".
pub fn round_font_size(size: f32) -> u32 {
    if !size.is_finite() || size <= 0.0 {
        return 0;
    }
    size.round_ties_even() as u32
}

/// A run of text sharing one font size and font name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content, untrimmed
    pub text: String,

    /// Font size in points
    pub font_size: f32,

    /// Font name (e.g., "Helvetica-Bold")
    pub font_name: String,

    /// Position on the page (top-left origin)
    pub bbox: BoundingBox,
}

impl Span {
    /// Create a new span.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        bbox: BoundingBox,
    ) -> Self {
        Self {
            text: text.into(),
            font_size,
            font_name: font_name.into(),
            bbox,
        }
    }

    /// Font size rounded to integer points.
    pub fn rounded_size(&self) -> u32 {
        round_font_size(self.font_size)
    }

    /// Whether the font name carries any of the bold markers.
    pub fn is_bold(&self) -> bool {
        self.font_name_contains_any(&BOLD_MARKERS)
    }

    /// Case-insensitive check of the font name against a set of fragments.
    pub fn font_name_contains_any(&self, markers: &[&str]) -> bool {
        let name = self.font_name.to_lowercase();
        markers.iter().any(|m| name.contains(m))
    }

    /// The text with surrounding whitespace removed.
    pub fn trimmed_text(&self) -> &str {
        self.text.trim()
    }
}

/// One visual text line, composed of one or more spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The spans in this line, in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// The span whose style represents the whole line.
    pub fn first_span(&self) -> Option<&Span> {
        self.spans.first()
    }

    /// Display text: span texts joined with a single space, then trimmed.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
            .trim()
            .to_string()
    }

    /// Check if the line has no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(|s| s.trimmed_text().is_empty())
    }

    /// Bounding box covering all spans.
    pub fn bbox(&self) -> Option<BoundingBox> {
        self.spans
            .iter()
            .map(|s| s.bbox)
            .reduce(|acc, b| acc.union(&b))
    }
}
