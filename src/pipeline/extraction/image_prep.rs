//! Image preprocessing ahead of OCR.
//!
//! Scanned narratives arrive as photos of flip charts and printed survey
//! sheets. Every image is converted to grayscale and contrast-stretched
//! before it reaches the engine; clean scans pass through nearly unchanged.

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};

use super::ExtractionError;

/// Decode image bytes, convert to grayscale, stretch contrast, and
/// re-encode as PNG for the OCR engine.
pub fn prepare_for_ocr(image_bytes: &[u8]) -> Result<Vec<u8>, ExtractionError> {
    let decoded = image::load_from_memory(image_bytes)
        .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;

    let gray = decoded.to_luma8();
    let stretched = stretch_contrast(&gray);

    let mut out = Vec::new();
    DynamicImage::ImageLuma8(stretched)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| ExtractionError::ImageDecode(e.to_string()))?;
    Ok(out)
}

/// Linear min-max contrast stretch. A flat image (single gray level) is
/// returned unchanged to avoid dividing by zero.
fn stretch_contrast(gray: &GrayImage) -> GrayImage {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    for pixel in gray.pixels() {
        let v = pixel.0[0];
        min = min.min(v);
        max = max.max(v);
    }

    if max <= min {
        return gray.clone();
    }

    let range = (max - min) as f32;
    let mut out = gray.clone();
    for pixel in out.pixels_mut() {
        let v = pixel.0[0];
        let stretched = ((v - min) as f32 / range * 255.0).round() as u8;
        *pixel = Luma([stretched]);
    }
    out
}
