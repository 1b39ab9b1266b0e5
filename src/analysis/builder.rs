//! Outline assembly in reading order.

use super::classifier::HeadingClassifier;
use crate::model::{Document, OutlineEntry};

/// Entries collected so far, threaded through the document walk.
///
/// The last appended entry is the only state consulted for deduplication.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutlineAccumulator {
    entries: Vec<OutlineEntry>,
}

impl OutlineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry unless it repeats the previous one exactly
    /// (same text, level and page).
    pub fn push(mut self, entry: OutlineEntry) -> Self {
        if self.entries.last() != Some(&entry) {
            self.entries.push(entry);
        }
        self
    }

    /// The most recently appended entry.
    pub fn last(&self) -> Option<&OutlineEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<OutlineEntry> {
        self.entries
    }
}

/// Walks pages, blocks and lines in reading order and collects headings.
#[derive(Debug, Clone, Copy)]
pub struct OutlineBuilder<'a> {
    classifier: &'a HeadingClassifier,
}

impl<'a> OutlineBuilder<'a> {
    pub fn new(classifier: &'a HeadingClassifier) -> Self {
        Self { classifier }
    }

    /// Build the outline. Entries come out in document order, never re-sorted.
    pub fn build(&self, doc: &Document) -> Vec<OutlineEntry> {
        doc.pages
            .iter()
            .enumerate()
            .fold(OutlineAccumulator::new(), |acc, (page_index, page)| {
                let page_number = (page_index + 1) as u32;
                page.text_blocks_in_reading_order()
                    .into_iter()
                    .flat_map(|block| block.lines.iter())
                    .fold(acc, |acc, line| {
                        let text = line.text();
                        if text.is_empty() {
                            return acc;
                        }
                        match self.classifier.classify_line(line) {
                            Some(level) => acc.push(OutlineEntry::new(level, text, page_number)),
                            None => acc,
                        }
                    })
            })
            .into_entries()
    }
}
