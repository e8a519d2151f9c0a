use serde::{Deserialize, Serialize};

/// One term of a topic's term distribution, carrying its normalized weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicTerm {
    pub term: String,
    pub weight: f64,
}

/// A discovered topic: id, top terms, and per-document membership weights.
/// Produced once per run by the topic model and never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Topic {
    pub id: usize,
    /// Top-N terms by weight, descending.
    pub top_terms: Vec<TopicTerm>,
    /// Membership weight per document, indexed like the corpus.
    pub document_weights: Vec<f64>,
}

impl Topic {
    /// Lowercased top-term strings, for keyword-overlap matching.
    pub fn term_set(&self) -> Vec<String> {
        self.top_terms
            .iter()
            .map(|t| t.term.to_lowercase())
            .collect()
    }
}
