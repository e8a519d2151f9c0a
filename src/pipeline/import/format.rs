use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ImportError;

/// Broad file categories the loader handles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    PlainText,
    Json,
    Image,
    Unsupported,
}

impl FileCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainText => "plain_text",
            Self::Json => "json",
            Self::Image => "image",
            Self::Unsupported => "unsupported",
        }
    }

    pub fn needs_ocr(&self) -> bool {
        matches!(self, Self::Image)
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

/// Result of format detection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatDetection {
    pub mime_type: String,
    pub category: FileCategory,
    pub file_size_bytes: u64,
}

const MAX_FILE_SIZE: u64 = 32 * 1024 * 1024; // 32MB

/// Detect file format from magic bytes (NOT file extensions).
/// Magic bytes don't lie — extensions can be wrong.
pub fn detect_format(path: &Path) -> Result<FormatDetection, ImportError> {
    let metadata = std::fs::metadata(path)?;
    let file_size = metadata.len();

    if file_size > MAX_FILE_SIZE {
        return Ok(FormatDetection {
            mime_type: "unknown".into(),
            category: FileCategory::Unsupported,
            file_size_bytes: file_size,
        });
    }

    let mut file = std::fs::File::open(path)?;
    let mut header = [0u8; 16];
    let bytes_read = file.read(&mut header)?;

    let (mime_type, category) = match &header[..bytes_read.min(8)] {
        // JPEG: starts with FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => ("image/jpeg".to_string(), FileCategory::Image),
        // PNG: starts with 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => ("image/png".to_string(), FileCategory::Image),
        // TIFF: little-endian (49 49 2A 00) or big-endian (4D 4D 00 2A)
        [0x49, 0x49, 0x2A, 0x00, ..] | [0x4D, 0x4D, 0x00, 0x2A, ..] => {
            ("image/tiff".to_string(), FileCategory::Image)
        }
        _ => {
            if is_likely_text(path)? {
                if is_likely_json(path)? {
                    ("application/json".to_string(), FileCategory::Json)
                } else {
                    ("text/plain".to_string(), FileCategory::PlainText)
                }
            } else {
                (
                    "application/octet-stream".to_string(),
                    FileCategory::Unsupported,
                )
            }
        }
    };

    Ok(FormatDetection {
        mime_type,
        category,
        file_size_bytes: file_size,
    })
}

/// Check if a file is likely plain text (valid UTF-8, mostly printable).
fn is_likely_text(path: &Path) -> Result<bool, ImportError> {
    let mut file = std::fs::File::open(path)?;
    let mut buffer = vec![0u8; 4096];
    let n = file.read(&mut buffer)?;
    buffer.truncate(n);

    if n == 0 {
        return Ok(false);
    }

    let text = match std::str::from_utf8(&buffer) {
        Ok(t) => t,
        Err(_) => return Ok(false),
    };

    // At least 80% printable characters (or whitespace)
    let printable = text
        .chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .count();
    let ratio = printable as f64 / text.chars().count().max(1) as f64;
    Ok(ratio > 0.80)
}

/// A text file whose first non-whitespace byte opens an object or array is
/// treated as JSON. Parse failures surface later as extraction errors.
fn is_likely_json(path: &Path) -> Result<bool, ImportError> {
    let mut file = std::fs::File::open(path)?;
    let mut buffer = vec![0u8; 256];
    let n = file.read(&mut buffer)?;
    buffer.truncate(n);

    for &b in &buffer {
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => continue,
            b'{' | b'[' => return Ok(true),
            _ => return Ok(false),
        }
    }
    Ok(false)
}
