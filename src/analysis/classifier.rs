//! Heading candidacy filtering and level assignment.

use regex::Regex;

use super::options::HeuristicOptions;
use super::thresholds::Thresholds;
use crate::model::{HeadingLevel, Line};

/// Section names promoted to H1 whatever their size.
const FRONT_MATTER_KEYWORDS: [&str; 6] = [
    "table of contents",
    "list of figures",
    "list of tables",
    "acknowledgements",
    "foreword",
    "preface",
];

const BACK_MATTER_KEYWORDS: [&str; 5] = [
    "references",
    "bibliography",
    "appendix",
    "glossary",
    "index",
];

/// Style facts about one line, taken from its first span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    /// Rounded font size
    pub size: u32,
    /// Whether the font looks bold
    pub is_bold: bool,
}

/// Condition attached to a keyword rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SizeCondition {
    /// Applies at any size
    Any,
    /// Size must reach this fraction of the H2 threshold
    AtLeastH2Ratio(f64),
}

/// One row of the keyword decision table.
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordRule {
    /// Lowercase fragments, any of which triggers the rule
    pub keywords: &'static [&'static str],
    /// Extra size requirement
    pub condition: SizeCondition,
    /// Level assigned when the rule fires
    pub level: HeadingLevel,
}

impl KeywordRule {
    fn matches(&self, lower_text: &str, style: LineStyle, thresholds: &Thresholds) -> bool {
        let size_ok = match self.condition {
            SizeCondition::Any => true,
            SizeCondition::AtLeastH2Ratio(ratio) => {
                f64::from(style.size) >= f64::from(thresholds.h2) * ratio
            }
        };
        size_ok && self.keywords.iter().any(|k| lower_text.contains(k))
    }
}

/// Why a line was not considered a heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Fewer than two characters
    TooShort,
    /// Page numbers, dates, URLs and similar furniture
    Noise,
    /// Regular weight at body size
    BodyText,
    /// Below the H3 margin
    TooSmall,
}

/// Precompiled patterns for running text that is never a heading.
#[derive(Debug, Clone)]
struct NoisePatterns {
    page_number: Regex,
    page_label: Regex,
    date: Regex,
    continued: Regex,
    symbols: Regex,
    roman_numeral: Regex,
}

impl NoisePatterns {
    fn new() -> Self {
        Self {
            page_number: Regex::new(r"^\s*\d+(\.\d+)*\s*$").unwrap(),
            page_label: Regex::new(r"^(page|pg\.)\s+\d+(\s+of\s+\d+)?$").unwrap(),
            date: Regex::new(r"^\d{1,2}\s+[a-zA-Z]{3,}\s+\d{4}$").unwrap(),
            continued: Regex::new(r"^\(continued\)$").unwrap(),
            symbols: Regex::new(r"^\s*[\W_]+\s*$").unwrap(),
            roman_numeral: Regex::new(r"^[ivxlcdm]+\.?$").unwrap(),
        }
    }

    fn is_noise(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.page_number.is_match(text)
            || self.page_label.is_match(&lower)
            || self.date.is_match(text)
            || lower.contains("copyright")
            || lower.contains("www.")
            || self.continued.is_match(&lower)
            || self.symbols.is_match(text)
            || self.roman_numeral.is_match(&lower)
    }
}

/// Decides, per line, whether it is a heading and at which level.
#[derive(Debug, Clone)]
pub struct HeadingClassifier {
    thresholds: Thresholds,
    candidate_min_h3_ratio: f64,
    keyword_rules: Vec<KeywordRule>,
    noise: NoisePatterns,
}

impl HeadingClassifier {
    /// Create a classifier for one document's thresholds.
    pub fn new(thresholds: Thresholds, options: &HeuristicOptions) -> Self {
        Self {
            thresholds,
            candidate_min_h3_ratio: options.candidate_min_h3_ratio,
            keyword_rules: default_keyword_rules(options),
            noise: NoisePatterns::new(),
        }
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// The keyword decision table, in priority order.
    pub fn keyword_rules(&self) -> &[KeywordRule] {
        &self.keyword_rules
    }

    /// Classify a line using its display text and first-span style.
    pub fn classify_line(&self, line: &Line) -> Option<HeadingLevel> {
        let span = line.first_span()?;
        let style = LineStyle {
            size: span.rounded_size(),
            is_bold: span.is_bold(),
        };
        self.classify(&line.text(), style)
    }

    /// Classify already extracted text and style.
    ///
    /// Lines rejected by [`HeadingClassifier::check_candidate`] never reach
    /// level assignment, keywords included.
    pub fn classify(&self, text: &str, style: LineStyle) -> Option<HeadingLevel> {
        self.check_candidate(text, style).ok()?;
        self.level_by_style(style)
            .or_else(|| self.level_by_keyword(text, style))
    }

    /// Candidacy filter.
    pub fn check_candidate(&self, text: &str, style: LineStyle) -> Result<(), Rejection> {
        if text.chars().count() < 2 {
            return Err(Rejection::TooShort);
        }
        if self.noise.is_noise(text) {
            return Err(Rejection::Noise);
        }
        if !style.is_bold && style.size <= self.thresholds.body_max {
            return Err(Rejection::BodyText);
        }
        if f64::from(style.size) < f64::from(self.thresholds.h3) * self.candidate_min_h3_ratio {
            return Err(Rejection::TooSmall);
        }
        Ok(())
    }

    /// Primary rule: bold text at or above a threshold.
    pub fn level_by_style(&self, style: LineStyle) -> Option<HeadingLevel> {
        if !style.is_bold {
            return None;
        }
        let t = &self.thresholds;
        if style.size >= t.h1 {
            Some(HeadingLevel::H1)
        } else if style.size >= t.h2 {
            Some(HeadingLevel::H2)
        } else if style.size >= t.h3 {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }

    /// Fallback rule: canonical section names.
    pub fn level_by_keyword(&self, text: &str, style: LineStyle) -> Option<HeadingLevel> {
        let lower = text.to_lowercase();
        self.keyword_rules
            .iter()
            .find(|rule| rule.matches(&lower, style, &self.thresholds))
            .map(|rule| rule.level)
    }
}

/// The built-in keyword table. The size condition on "introduction" applies
/// to that keyword alone.
fn default_keyword_rules(options: &HeuristicOptions) -> Vec<KeywordRule> {
    vec![
        KeywordRule {
            keywords: &FRONT_MATTER_KEYWORDS,
            condition: SizeCondition::Any,
            level: HeadingLevel::H1,
        },
        KeywordRule {
            keywords: &["introduction"],
            condition: SizeCondition::AtLeastH2Ratio(options.introduction_min_h2_ratio),
            level: HeadingLevel::H1,
        },
        KeywordRule {
            keywords: &BACK_MATTER_KEYWORDS,
            condition: SizeCondition::Any,
            level: HeadingLevel::H1,
        },
    ]
}
