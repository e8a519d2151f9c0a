use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::ComponentCategory;

/// A tagged span of narrative text. Created by the component extractor,
/// never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionComponent {
    pub document_id: Uuid,
    pub document_path: String,
    pub category: ComponentCategory,
    pub span: String,
    /// Byte offset of the span within the document's extracted text.
    pub offset: usize,
    /// Label of the pattern rule that fired.
    pub rule: String,
}

/// A topic matched to one backbone domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackboneMatch {
    pub topic_id: usize,
    pub domain: String,
    /// Best-overlapping subdiscipline within the domain, when one exists.
    pub subdiscipline: Option<String>,
    /// Fraction of the topic's top terms found in the domain keyword bag.
    pub score: f64,
    pub matched_terms: Vec<String>,
    /// True when the match came from a manual pin rather than scoring.
    pub pinned: bool,
}

/// Where an SVO link originated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum LinkSource {
    TopicTerm { topic_id: usize, term: String },
    Component { document_path: String, category: ComponentCategory },
}

/// A term or span linked to one SVO catalog entry. `variable` is always a
/// key present in the supplied catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvoLink {
    pub source: LinkSource,
    pub variable: String,
    pub matched_phrase: String,
}

/// Terminal artifact of a run: everything the reporter persists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingResult {
    pub backbone_matches: Vec<BackboneMatch>,
    pub components: Vec<DecisionComponent>,
    pub svo_links: Vec<SvoLink>,
}
