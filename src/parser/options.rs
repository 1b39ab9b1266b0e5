//! Decoding options.

/// Options for decoding PDF documents into layout trees.
#[derive(Debug, Clone, Default)]
pub struct DecodeOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl DecodeOptions {
    /// Create new decode options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (undecodable pages become empty).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    pub fn is_lenient(&self) -> bool {
        self.error_mode == ErrorMode::Lenient
    }
}

/// Error handling mode during decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip invalid pages and continue
    Lenient,
}
