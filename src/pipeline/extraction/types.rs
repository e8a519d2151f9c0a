use super::ExtractionError;
use crate::models::ExtractionMethod;

/// Text extracted from a single source file.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    pub text: String,
    pub method: ExtractionMethod,
    /// OCR confidence in 0.0..=1.0, when OCR produced the text.
    pub confidence: Option<f32>,
}

/// Raw OCR result from the engine.
#[derive(Debug)]
pub struct OcrPageResult {
    pub text: String,
    pub confidence: f32,
}

/// OCR engine abstraction (allows mocking for tests).
pub trait OcrEngine: Send + Sync {
    fn ocr_image(&self, image_bytes: &[u8]) -> Result<OcrPageResult, ExtractionError>;
}
