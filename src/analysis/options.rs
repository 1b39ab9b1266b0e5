//! Heuristic tuning knobs.

/// Fallback thresholds used when a document has no font sizes above body text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdDefaults {
    pub h1: u32,
    pub h2: u32,
    pub h3: u32,
}

impl Default for ThresholdDefaults {
    fn default() -> Self {
        Self {
            h1: 24,
            h2: 18,
            h3: 14,
        }
    }
}

/// Options for outline inference.
#[derive(Debug, Clone, PartialEq)]
pub struct HeuristicOptions {
    /// Sizes at or below this are never counted (footnotes, footers)
    pub noise_floor: u32,

    /// Largest size considered body text
    pub body_max: u32,

    /// Thresholds used when no size exceeds `body_max`
    pub defaults: ThresholdDefaults,

    /// Number of leading pages scanned for a title
    pub title_page_limit: usize,

    /// A title must be at least this fraction of the H1 threshold
    pub title_min_h1_ratio: f64,

    /// A title needs at least this many words
    pub title_min_words: usize,

    /// A heading candidate must be at least this fraction of the H3 threshold
    pub candidate_min_h3_ratio: f64,

    /// "Introduction" is promoted only at this fraction of the H2 threshold
    pub introduction_min_h2_ratio: f64,
}

impl HeuristicOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the noise floor.
    pub fn with_noise_floor(mut self, size: u32) -> Self {
        self.noise_floor = size;
        self
    }

    /// Set the largest body text size.
    pub fn with_body_max(mut self, size: u32) -> Self {
        self.body_max = size;
        self
    }

    /// Set the fallback thresholds.
    pub fn with_defaults(mut self, defaults: ThresholdDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Set how many pages are scanned for a title.
    pub fn with_title_page_limit(mut self, pages: usize) -> Self {
        self.title_page_limit = pages;
        self
    }
}

impl Default for HeuristicOptions {
    fn default() -> Self {
        Self {
            noise_floor: 9,
            body_max: 12,
            defaults: ThresholdDefaults::default(),
            title_page_limit: 2,
            title_min_h1_ratio: 0.8,
            title_min_words: 3,
            candidate_min_h3_ratio: 0.9,
            introduction_min_h2_ratio: 0.9,
        }
    }
}
