//! JSON rendering for outline results.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with 2-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert an outline result to JSON.
///
/// Keys come out as `title, outline` and `level, text, page`. Non-ASCII text
/// is written as UTF-8, never escaped.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Serialize and write an outline result to `path`.
pub fn write_json<P: AsRef<Path>>(path: P, result: &OutlineResult, format: JsonFormat) -> Result<()> {
    let json = to_json(result, format)?;
    fs::write(path, json)?;
    Ok(())
}
