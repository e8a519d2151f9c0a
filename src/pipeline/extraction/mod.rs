pub mod image_prep;
pub mod json;
pub mod ocr;
pub mod text;
pub mod types;

pub use ocr::*;
pub use types::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed JSON document: {0}")]
    MalformedJson(String),

    #[error("JSON document contains no string content")]
    NoStringContent,

    #[error("Could not decode image: {0}")]
    ImageDecode(String),

    #[error("No OCR engine available (build with the `ocr` feature)")]
    OcrUnavailable,

    #[error("OCR engine initialization failed: {0}")]
    OcrInit(String),

    #[error("OCR processing failed: {0}")]
    OcrProcessing(String),

    #[error("Tesseract language data not found at {0}")]
    TessdataNotFound(PathBuf),
}
