//! Font size frequency analysis.

use std::collections::BTreeMap;

use crate::model::Document;

/// Weighted histogram of rounded font sizes.
///
/// The weight of a size is the total number of characters (trimmed span text)
/// set at that size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontSizeHistogram {
    weights: BTreeMap<u32, usize>,
}

impl FontSizeHistogram {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every text span in the document.
    ///
    /// Sizes at or below `noise_floor` are left out of the result.
    pub fn from_document(doc: &Document, noise_floor: u32) -> Self {
        let mut histogram = Self::new();

        for page in &doc.pages {
            for block in page.blocks.iter().filter(|b| b.is_text()) {
                for span in block.lines.iter().flat_map(|l| &l.spans) {
                    let text = span.trimmed_text();
                    let size = span.rounded_size();
                    if size > 0 && !text.is_empty() {
                        histogram.add(size, text.chars().count());
                    }
                }
            }
        }

        histogram.weights.retain(|size, _| *size > noise_floor);
        histogram
    }

    /// Add weight to a size.
    pub fn add(&mut self, size: u32, weight: usize) {
        *self.weights.entry(size).or_insert(0) += weight;
    }

    /// Accumulated weight for a size.
    pub fn weight(&self, size: u32) -> usize {
        self.weights.get(&size).copied().unwrap_or(0)
    }

    /// Sizes ranked by `(weight, size)`, both descending.
    pub fn ranked_sizes(&self) -> Vec<u32> {
        let mut sizes: Vec<(u32, usize)> = self.weights.iter().map(|(s, w)| (*s, *w)).collect();
        sizes.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        sizes.into_iter().map(|(size, _)| size).collect()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl FromIterator<(u32, usize)> for FontSizeHistogram {
    fn from_iter<I: IntoIterator<Item = (u32, usize)>>(iter: I) -> Self {
        let mut histogram = Self::new();
        for (size, weight) in iter {
            histogram.add(size, weight);
        }
        histogram
    }
}
