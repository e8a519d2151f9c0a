use std::path::{Path, PathBuf};

use rayon::prelude::*;

use super::format::{detect_format, FileCategory};
use super::ImportError;
use crate::models::{Corpus, ExtractionMethod, SkippedFile, SourceDocument};
use crate::pipeline::extraction::{self, OcrEngine};

/// Load every readable file under `input_dir` into an ordered corpus.
///
/// Unsupported, oversized, and unextractable files become skip records
/// rather than failures. With `parallel`, files are processed on a rayon
/// pool; the result is re-sorted into path order either way, so corpus
/// order (and everything seeded downstream) is deterministic.
pub fn load_corpus(
    input_dir: &Path,
    ocr: Option<&dyn OcrEngine>,
    parallel: bool,
) -> Result<Corpus, ImportError> {
    if !input_dir.is_dir() {
        return Err(ImportError::InputDirMissing(input_dir.to_path_buf()));
    }

    let mut paths = Vec::new();
    collect_files(input_dir, &mut paths)?;
    paths.sort();

    tracing::info!(
        files = paths.len(),
        parallel,
        "Loading corpus from {}",
        input_dir.display()
    );

    let outcomes: Vec<FileOutcome> = if parallel {
        paths
            .par_iter()
            .map(|path| load_file(input_dir, path, ocr))
            .collect()
    } else {
        paths
            .iter()
            .map(|path| load_file(input_dir, path, ocr))
            .collect()
    };

    let mut documents = Vec::new();
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            FileOutcome::Loaded(doc) => documents.push(doc),
            FileOutcome::Skipped(skip) => {
                tracing::warn!(path = %skip.path.display(), reason = %skip.reason, "Skipping file");
                skipped.push(skip);
            }
        }
    }

    documents.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));

    if documents.is_empty() {
        return Err(ImportError::EmptyCorpus(input_dir.to_path_buf()));
    }

    tracing::info!(
        documents = documents.len(),
        skipped = skipped.len(),
        "Corpus loaded"
    );

    Ok(Corpus { documents, skipped })
}

enum FileOutcome {
    Loaded(SourceDocument),
    Skipped(SkippedFile),
}

fn load_file(input_dir: &Path, path: &Path, ocr: Option<&dyn OcrEngine>) -> FileOutcome {
    let relative_path = path
        .strip_prefix(input_dir)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();

    let format = match detect_format(path) {
        Ok(f) => f,
        Err(e) => {
            return FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                reason: format!("format detection failed: {e}"),
            })
        }
    };

    if !format.category.is_supported() {
        return FileOutcome::Skipped(SkippedFile {
            path: path.to_path_buf(),
            reason: format!(
                "unsupported format ({}, {} bytes)",
                format.mime_type, format.file_size_bytes
            ),
        });
    }

    let extracted = match format.category {
        FileCategory::PlainText => extraction::text::extract_plain_text(path),
        FileCategory::Json => extraction::json::extract_json(path),
        FileCategory::Image => extract_image(path, ocr),
        FileCategory::Unsupported => unreachable!("filtered above"),
    };

    match extracted {
        Ok(extracted) if extracted.text.trim().is_empty() => {
            FileOutcome::Skipped(SkippedFile {
                path: path.to_path_buf(),
                reason: "no text content".into(),
            })
        }
        Ok(extracted) => FileOutcome::Loaded(SourceDocument {
            id: SourceDocument::derive_id(&relative_path),
            relative_path,
            category: format.category,
            method: extracted.method,
            text: extracted.text,
        }),
        Err(e) => FileOutcome::Skipped(SkippedFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }
}

fn extract_image(
    path: &Path,
    ocr: Option<&dyn OcrEngine>,
) -> Result<extraction::ExtractedText, extraction::ExtractionError> {
    let Some(engine) = ocr else {
        return Err(extraction::ExtractionError::OcrUnavailable);
    };
    let bytes = std::fs::read(path)?;
    let prepared = extraction::image_prep::prepare_for_ocr(&bytes)?;
    let result = engine.ocr_image(&prepared)?;
    Ok(extraction::ExtractedText {
        text: result.text,
        method: ExtractionMethod::Ocr,
        confidence: Some(result.confidence),
    })
}

fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), ImportError> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::extraction::MockOcrEngine;
    use image::{DynamicImage, GrayImage, ImageFormat, Luma};
    use std::io::Cursor;

    fn write_corpus_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("a_interview.txt"),
            "We want to restore streamflow for fish habitat.",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("b_survey.json"),
            r#"{"answer": "nitrate levels must stay below the permit threshold"}"#,
        )
        .unwrap();
        dir
    }

    #[test]
    fn loads_text_and_json_in_path_order() {
        let dir = write_corpus_dir();
        let corpus = load_corpus(dir.path(), None, false).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.documents[0].relative_path, "a_interview.txt");
        assert_eq!(corpus.documents[1].relative_path, "b_survey.json");
        assert_eq!(corpus.documents[0].method, ExtractionMethod::PlainTextRead);
        assert_eq!(corpus.documents[1].method, ExtractionMethod::JsonFlatten);
    }

    #[test]
    fn parallel_load_matches_sequential() {
        let dir = write_corpus_dir();
        let sequential = load_corpus(dir.path(), None, false).unwrap();
        let parallel = load_corpus(dir.path(), None, true).unwrap();
        let seq_paths: Vec<_> = sequential
            .documents
            .iter()
            .map(|d| d.relative_path.clone())
            .collect();
        let par_paths: Vec<_> = parallel
            .documents
            .iter()
            .map(|d| d.relative_path.clone())
            .collect();
        assert_eq!(seq_paths, par_paths);
        assert_eq!(sequential.documents[0].id, parallel.documents[0].id);
    }

    #[test]
    fn recurses_into_subdirectories() {
        let dir = write_corpus_dir();
        let sub = dir.path().join("round_two");
        std::fs::create_dir(&sub).unwrap();
        std::fs::write(sub.join("c_notes.txt"), "Monitor dissolved oxygen weekly.").unwrap();
        let corpus = load_corpus(dir.path(), None, false).unwrap();
        assert_eq!(corpus.len(), 3);
        assert!(corpus
            .documents
            .iter()
            .any(|d| d.relative_path.ends_with("c_notes.txt")));
    }

    #[test]
    fn empty_dir_is_empty_corpus_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_corpus(dir.path(), None, false);
        assert!(matches!(result, Err(ImportError::EmptyCorpus(_))));
    }

    #[test]
    fn missing_dir_is_an_error() {
        let result = load_corpus(Path::new("/nonexistent/corpus"), None, false);
        assert!(matches!(result, Err(ImportError::InputDirMissing(_))));
    }

    #[test]
    fn binary_files_are_skipped_not_fatal() {
        let dir = write_corpus_dir();
        std::fs::write(dir.path().join("junk.bin"), [0x4D, 0x5A, 0x90, 0x00]).unwrap();
        let corpus = load_corpus(dir.path(), None, false).unwrap();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.skipped.len(), 1);
        assert!(corpus.skipped[0].reason.contains("unsupported"));
    }

    #[test]
    fn image_without_ocr_engine_is_skipped() {
        let dir = write_corpus_dir();
        // Valid PNG magic, engine absent
        std::fs::write(
            dir.path().join("photo.png"),
            [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
        )
        .unwrap();
        let corpus = load_corpus(dir.path(), None, false).unwrap();
        assert_eq!(corpus.len(), 2);
        assert!(corpus
            .skipped
            .iter()
            .any(|s| s.reason.contains("No OCR engine")));
    }

    #[test]
    fn image_with_mock_engine_is_loaded() {
        let dir = write_corpus_dir();
        let img = GrayImage::from_pixel(8, 8, Luma([180]));
        let mut png = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        std::fs::write(dir.path().join("flipchart.png"), &png).unwrap();

        let engine = MockOcrEngine::new("keep extraction below recharge", 0.9);
        let corpus = load_corpus(dir.path(), Some(&engine), false).unwrap();
        assert_eq!(corpus.len(), 3);
        let doc = corpus
            .documents
            .iter()
            .find(|d| d.relative_path == "flipchart.png")
            .unwrap();
        assert_eq!(doc.method, ExtractionMethod::Ocr);
        assert_eq!(doc.text, "keep extraction below recharge");
    }

    #[test]
    fn empty_text_file_skipped() {
        let dir = write_corpus_dir();
        std::fs::write(dir.path().join("blank.txt"), "   \n  ").unwrap();
        let corpus = load_corpus(dir.path(), None, false).unwrap();
        assert_eq!(corpus.len(), 2);
    }
}
