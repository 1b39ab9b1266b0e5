//! Title detection from the most prominent text on the first pages.

use std::cmp::Ordering;

use regex::Regex;

use super::options::HeuristicOptions;
use crate::model::Document;

/// Font-name fragments that count as bold when ranking title candidates.
const TITLE_BOLD_MARKERS: [&str; 2] = ["bold", "black"];

/// A span considered as a possible title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleCandidate {
    /// Trimmed span text
    pub text: String,
    /// Rounded font size
    pub size: u32,
    /// Page index (0-based)
    pub page_index: usize,
    /// Whether the font looks bold
    pub is_bold: bool,
}

impl TitleCandidate {
    fn first_line(&self) -> String {
        self.text.split('\n').next().unwrap_or_default().trim().to_string()
    }

    /// Ranking order: larger, earlier, bold, longer first.
    fn rank_cmp(&self, other: &TitleCandidate) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then_with(|| self.page_index.cmp(&other.page_index))
            .then_with(|| other.is_bold.cmp(&self.is_bold))
            .then_with(|| other.text.chars().count().cmp(&self.text.chars().count()))
    }
}

/// Running maximum carried through the scan.
///
/// Only spans tied at the largest size seen so far are kept.
#[derive(Debug, Default)]
struct ScanState {
    max_size: u32,
    candidates: Vec<TitleCandidate>,
}

impl ScanState {
    fn observe(mut self, candidate: TitleCandidate) -> Self {
        match candidate.size.cmp(&self.max_size) {
            Ordering::Greater => {
                self.max_size = candidate.size;
                self.candidates.clear();
                self.candidates.push(candidate);
            }
            Ordering::Equal => self.candidates.push(candidate),
            Ordering::Less => {}
        }
        self
    }
}

/// Picks a title from the largest text near the start of a document.
#[derive(Debug, Clone)]
pub struct TitleDetector {
    page_limit: usize,
    min_h1_ratio: f64,
    min_words: usize,
    bare_integer: Regex,
}

impl TitleDetector {
    /// Create a detector from heuristic options.
    pub fn new(options: &HeuristicOptions) -> Self {
        Self {
            page_limit: options.title_page_limit,
            min_h1_ratio: options.title_min_h1_ratio,
            min_words: options.title_min_words,
            bare_integer: Regex::new(r"^\d+$").unwrap(),
        }
    }

    /// All spans tied at the largest size on the scanned pages, ranked.
    pub fn candidates(&self, doc: &Document) -> Vec<TitleCandidate> {
        let spans = doc
            .pages
            .iter()
            .take(self.page_limit)
            .enumerate()
            .flat_map(|(page_index, page)| {
                page.text_blocks_in_reading_order()
                    .into_iter()
                    .flat_map(|block| block.lines.iter())
                    .flat_map(|line| line.spans.iter())
                    .map(move |span| (page_index, span))
            });

        let state = spans.fold(ScanState::default(), |state, (page_index, span)| {
            let text = span.trimmed_text();
            let size = span.rounded_size();
            if text.is_empty() || size == 0 {
                return state;
            }
            state.observe(TitleCandidate {
                text: text.to_string(),
                size,
                page_index,
                is_bold: span.font_name_contains_any(&TITLE_BOLD_MARKERS),
            })
        });

        let mut candidates = state.candidates;
        candidates.sort_by(TitleCandidate::rank_cmp);
        candidates
    }

    /// Detect the title, or `None` when the caller must supply one.
    pub fn detect(&self, doc: &Document, h1: u32) -> Option<String> {
        let candidates = self.candidates(doc);
        let min_size = f64::from(h1) * self.min_h1_ratio;

        if let Some(found) = candidates.iter().find(|c| self.is_plausible(c, min_size)) {
            log::debug!("Title candidate accepted: {:?}", found.text);
            return Some(found.first_line());
        }

        // Nothing plausible: take the largest text if it sits on the first page.
        match candidates.first() {
            Some(top) if top.page_index == 0 => {
                log::debug!("Title fallback to largest text: {:?}", top.text);
                Some(top.first_line())
            }
            _ => None,
        }
    }

    fn is_plausible(&self, candidate: &TitleCandidate, min_size: f64) -> bool {
        let lower = candidate.text.to_lowercase();
        candidate.page_index == 0
            && candidate.text.split_whitespace().count() >= self.min_words
            && f64::from(candidate.size) >= min_size
            && !self.bare_integer.is_match(&candidate.text)
            && !lower.contains("contents")
            && !lower.contains("page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::{line, span, text_block, text_block_at};
    use crate::model::Page;

    fn detector() -> TitleDetector {
        TitleDetector::new(&HeuristicOptions::default())
    }

    #[test]
    fn test_title_is_largest_plausible_text() {
        let page = Page::letter(0)
            .with_block(text_block(
                50.0,
                vec![line(vec![span("Annual Report For Shareholders", 26.0, "Times-Bold")])],
            ))
            .with_block(text_block(100.0, vec![line(vec![span("Summary", 18.0, "Times-Bold")])]));
        let doc = Document::from_pages(vec![page]);

        assert_eq!(
            detector().detect(&doc, 26),
            Some("Annual Report For Shareholders".to_string())
        );
    }

    #[test]
    fn test_larger_size_discards_previous_candidates() {
        let page = Page::letter(0)
            .with_block(text_block(10.0, vec![line(vec![span("first big heading", 20.0, "A")])]))
            .with_block(text_block(20.0, vec![line(vec![span("same size again", 20.0, "A")])]))
            .with_block(text_block(30.0, vec![line(vec![span("the real title here", 30.0, "A")])]))
            .with_block(text_block(40.0, vec![line(vec![span("tied with the title", 30.0, "A-Bold")])]));
        let doc = Document::from_pages(vec![page]);

        let candidates = detector().candidates(&doc);
        let texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
        // Bold ranks first among equals.
        assert_eq!(texts, vec!["tied with the title", "the real title here"]);
    }

    #[test]
    fn test_scan_follows_reading_order_not_decoder_order() {
        // Decoder emits the lower block first; both are tied in size.
        let page = Page::letter(0)
            .with_block(text_block_at(20.0, 400.0, vec![line(vec![span("Lower Block Here", 24.0, "A")])]))
            .with_block(text_block_at(20.0, 80.0, vec![line(vec![span("Upper Block Here", 24.0, "A")])]));
        let doc = Document::from_pages(vec![page]);

        let texts: Vec<String> = detector().candidates(&doc).into_iter().map(|c| c.text).collect();
        // Same size, page, weight and length: stable order follows reading order.
        assert_eq!(texts, vec!["Upper Block Here", "Lower Block Here"]);
    }

    #[test]
    fn test_rejects_short_or_noise_titles_then_falls_back() {
        let page = Page::letter(0)
            .with_block(text_block(10.0, vec![line(vec![span("Table of Contents", 30.0, "A-Bold")])]))
            .with_block(text_block(20.0, vec![line(vec![span("Overview", 30.0, "A-Bold")])]));
        let doc = Document::from_pages(vec![page]);

        // "Table of Contents" fails the contents rule, "Overview" is too short,
        // so the top-ranked candidate is taken as is.
        assert_eq!(detector().detect(&doc, 30), Some("Table of Contents".to_string()));
    }

    #[test]
    fn test_rejects_candidates_below_h1_ratio() {
        let page = Page::letter(0).with_block(text_block(
            10.0,
            vec![line(vec![span("A Modest Little Title", 16.0, "A")])],
        ));
        let doc = Document::from_pages(vec![page]);

        // 16 < 0.8 * 24, but the fallback still returns the page-0 winner.
        assert_eq!(detector().detect(&doc, 24), Some("A Modest Little Title".to_string()));
        let candidates = detector().candidates(&doc);
        assert!(!detector().is_plausible(&candidates[0], 0.8 * 24.0));
    }

    #[test]
    fn test_title_only_on_second_page_is_none() {
        let first = Page::letter(0).with_block(text_block(10.0, vec![line(vec![span("small", 11.0, "A")])]));
        let second = Page::letter(1).with_block(text_block(
            10.0,
            vec![line(vec![span("Big Title On Page Two", 32.0, "A-Bold")])],
        ));
        let doc = Document::from_pages(vec![first, second]);

        assert_eq!(detector().detect(&doc, 32), None);
    }

    #[test]
    fn test_pages_beyond_limit_are_ignored() {
        let pages = vec![
            Page::letter(0).with_block(text_block(10.0, vec![line(vec![span("The Opening Title Text", 20.0, "A")])])),
            Page::letter(1),
            Page::letter(2).with_block(text_block(10.0, vec![line(vec![span("Huge Late Banner Text", 60.0, "A")])])),
        ];
        let doc = Document::from_pages(pages);
        assert_eq!(detector().detect(&doc, 20), Some("The Opening Title Text".to_string()));
    }

    #[test]
    fn test_bare_integer_and_page_words_rejected() {
        let page = Page::letter(0)
            .with_block(text_block(10.0, vec![line(vec![span("2024", 40.0, "A")])]))
            .with_block(text_block(20.0, vec![line(vec![span("See page one now", 40.0, "A")])]))
            .with_block(text_block(30.0, vec![line(vec![span("Design Of Small Things", 40.0, "A")])]));
        let doc = Document::from_pages(vec![page]);

        assert_eq!(detector().detect(&doc, 40), Some("Design Of Small Things".to_string()));
    }

    #[test]
    fn test_empty_document_has_no_title() {
        assert_eq!(detector().detect(&Document::new(), 24), None);
        let doc = Document::from_pages(vec![Page::letter(0)]);
        assert_eq!(detector().detect(&doc, 24), None);
    }
}
