use std::path::Path;

use super::types::ExtractedText;
use super::ExtractionError;
use crate::models::ExtractionMethod;

/// Read a plain-text (or Markdown) file. Invalid UTF-8 sequences are
/// replaced rather than failing the document.
pub fn extract_plain_text(path: &Path) -> Result<ExtractedText, ExtractionError> {
    let bytes = std::fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes).into_owned();
    Ok(ExtractedText {
        text,
        method: ExtractionMethod::PlainTextRead,
        confidence: None,
    })
}
