//! Directory batch processing.
//!
//! Every `*.pdf` in an input directory is decoded, analyzed and written as
//! `<stem>.json` to an output directory. A file that fails is logged and
//! counted; it never stops the others.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::analysis::{HeuristicOptions, OutlineExtractor};
use crate::error::Result;
use crate::parser::DecodeOptions;
use crate::render::{write_json, JsonFormat};

/// Options for [`process_directory`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Process files on the rayon thread pool
    pub parallel: bool,

    /// Output JSON layout
    pub json_format: JsonFormat,

    /// Heuristics for outline inference
    pub heuristics: HeuristicOptions,

    /// Decoder options
    pub decode: DecodeOptions,
}

impl BatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process files one at a time.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    pub fn with_json_format(mut self, format: JsonFormat) -> Self {
        self.json_format = format;
        self
    }

    pub fn with_heuristics(mut self, heuristics: HeuristicOptions) -> Self {
        self.heuristics = heuristics;
        self
    }

    pub fn with_decode_options(mut self, decode: DecodeOptions) -> Self {
        self.decode = decode;
        self
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            parallel: true,
            json_format: JsonFormat::Pretty,
            heuristics: HeuristicOptions::default(),
            decode: DecodeOptions::new().lenient(),
        }
    }
}

/// A file that could not be processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of processing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// JSON written to the contained path
    Written(PathBuf),
    Failed(BatchFailure),
}

/// Counts for a finished batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// PDF files discovered
    pub found: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures in file name order
    pub failures: Vec<BatchFailure>,
}

impl BatchSummary {
    fn from_outcomes(found: usize, outcomes: Vec<FileOutcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Self { found, ..Self::default() }, |mut summary, outcome| {
                match outcome {
                    FileOutcome::Written(_) => summary.succeeded += 1,
                    FileOutcome::Failed(failure) => {
                        summary.failed += 1;
                        summary.failures.push(failure);
                    }
                }
                summary
            })
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Derive a title from a file name.
///
/// The extension is dropped, underscores become spaces and the result is
/// title-cased.
///
/// ```
/// use pdfoutline::batch::title_from_path;
///
/// assert_eq!(title_from_path("annual_REPORT_2024.pdf"), "Annual Report 2024");
/// ```
pub fn title_from_path<P: AsRef<Path>>(path: P) -> String {
    let stem = path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

/// Uppercase the first letter of every run of letters, lowercase the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        let cased = c.is_uppercase() || c.is_lowercase();
        if cased && !in_word {
            result.extend(c.to_uppercase());
        } else if cased {
            result.extend(c.to_lowercase());
        } else {
            result.push(c);
        }
        in_word = cased;
    }

    result
}

/// List PDF files (extension `pdf`, any case) sorted by file name.
pub fn discover_pdfs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_pdf = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
        if is_pdf && path.is_file() {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Process a directory of PDFs.
pub fn process_directory<P, Q>(input_dir: P, output_dir: Q, options: &BatchOptions) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    process_directory_with_progress(input_dir, output_dir, options, |_| {})
}

/// Process a directory of PDFs, reporting each finished file to `on_file`.
///
/// `on_file` may be called from several threads at once when
/// [`BatchOptions::parallel`] is set.
pub fn process_directory_with_progress<P, Q, F>(
    input_dir: P,
    output_dir: Q,
    options: &BatchOptions,
    on_file: F,
) -> Result<BatchSummary>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&FileOutcome) + Sync,
{
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;

    let files = discover_pdfs(input_dir.as_ref())?;
    log::info!(
        "Found {} PDF file(s) in {}",
        files.len(),
        input_dir.as_ref().display()
    );

    let extractor = OutlineExtractor::with_options(options.heuristics.clone());
    let run = |path: &PathBuf| {
        let outcome = process_file(path, output_dir, &extractor, options);
        on_file(&outcome);
        outcome
    };

    // Both iterators keep input order, so failures stay sorted by file name.
    let outcomes: Vec<FileOutcome> = if options.parallel {
        files.par_iter().map(run).collect()
    } else {
        files.iter().map(run).collect()
    };

    let summary = BatchSummary::from_outcomes(files.len(), outcomes);
    log::info!(
        "Batch finished: {} succeeded, {} failed",
        summary.succeeded,
        summary.failed
    );
    Ok(summary)
}

/// Process a single PDF into `output_dir/<stem>.json`.
pub fn process_file(
    path: &Path,
    output_dir: &Path,
    extractor: &OutlineExtractor,
    options: &BatchOptions,
) -> FileOutcome {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let output_path = output_dir.join(format!("{}.json", stem));

    let written = crate::extract_file_with(path, extractor, options.decode.clone())
        .and_then(|result| write_json(&output_path, &result, options.json_format));

    match written {
        Ok(()) => {
            log::info!("Processed {} -> {}", path.display(), output_path.display());
            FileOutcome::Written(output_path)
        }
        Err(e) => {
            log::error!("Failed to process {}: {}", path.display(), e);
            FileOutcome::Failed(BatchFailure {
                path: path.to_path_buf(),
                error: e.to_string(),
            })
        }
    }
}
