use std::collections::HashSet;

use uuid::Uuid;

use super::patterns::RuleSet;
use crate::models::{Corpus, DecisionComponent};

/// Tag sentence-level spans of every document with decision-component
/// categories.
///
/// The first rule that matches a sentence tags it; identical
/// (document, span text) pairs are emitted once, so the components table
/// has no duplicate rows.
pub fn extract_components(corpus: &Corpus, rules: &RuleSet) -> Vec<DecisionComponent> {
    let mut components = Vec::new();
    let mut seen: HashSet<(Uuid, String)> = HashSet::new();

    for document in &corpus.documents {
        for (offset, sentence) in split_sentences(&document.text) {
            let span = sentence.trim();
            if span.is_empty() {
                continue;
            }

            let Some(rule) = rules.rules.iter().find(|r| r.regex.is_match(span)) else {
                continue;
            };

            if !seen.insert((document.id, span.to_string())) {
                continue;
            }

            components.push(DecisionComponent {
                document_id: document.id,
                document_path: document.relative_path.clone(),
                category: rule.category,
                span: span.to_string(),
                offset,
                rule: rule.label.clone(),
            });
        }
    }

    tracing::info!(components = components.len(), "Component extraction complete");
    components
}

/// Split text into sentences at `.`, `!`, `?`, and newline boundaries,
/// keeping each sentence's byte offset.
fn split_sentences(text: &str) -> Vec<(usize, &str)> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?' | '\n') {
            if i > start {
                sentences.push((start, &text[start..i]));
            }
            start = i + c.len_utf8();
        }
    }
    if start < text.len() {
        sentences.push((start, &text[start..]));
    }
    sentences
}
