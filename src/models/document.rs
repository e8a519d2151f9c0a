use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ExtractionMethod;
use crate::pipeline::import::FileCategory;

/// A single narrative document after loading. Immutable once the corpus
/// is assembled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    pub id: Uuid,
    /// Path relative to the input directory, the stable provenance key.
    pub relative_path: String,
    pub category: FileCategory,
    pub method: ExtractionMethod,
    pub text: String,
}

impl SourceDocument {
    /// Document ids are derived from the relative path so that re-running
    /// the pipeline on the same inputs yields the same ids.
    pub fn derive_id(relative_path: &str) -> Uuid {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, relative_path.as_bytes())
    }
}

/// A file the loader looked at but could not turn into text. Skips are
/// recorded, reported, and never fatal on their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Ordered collection of loaded documents plus the files that were skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corpus {
    pub documents: Vec<SourceDocument>,
    pub skipped: Vec<SkippedFile>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
