use std::collections::BTreeMap;

use crate::config::ConfigError;
use crate::models::{BackboneMatch, ScienceBackbone, Topic};

/// Match every topic against the science backbone.
///
/// A topic matches a domain when the fraction of its top terms found in the
/// domain's keyword bag reaches `min_overlap`. Manual pins bypass scoring
/// entirely. Matches per topic are ordered by score descending, then domain
/// name, so output is deterministic.
pub fn map_topics(
    topics: &[Topic],
    backbone: &ScienceBackbone,
    pins: &BTreeMap<usize, String>,
    min_overlap: f64,
) -> Result<Vec<BackboneMatch>, ConfigError> {
    // Validate pins against the backbone before any scoring
    for (topic_id, domain) in pins {
        if !backbone.contains_domain(domain) {
            return Err(ConfigError::DanglingPin {
                topic_id: *topic_id,
                domain: domain.clone(),
            });
        }
    }

    let mut matches = Vec::new();

    for topic in topics {
        if let Some(domain) = pins.get(&topic.id) {
            matches.push(BackboneMatch {
                topic_id: topic.id,
                domain: domain.clone(),
                subdiscipline: None,
                score: 1.0,
                matched_terms: Vec::new(),
                pinned: true,
            });
            continue;
        }

        let terms = topic.term_set();
        if terms.is_empty() {
            continue;
        }

        let mut topic_matches: Vec<BackboneMatch> = Vec::new();
        for domain in backbone.domains.keys() {
            let bag = backbone.keyword_bag(domain);
            let matched_terms: Vec<String> = terms
                .iter()
                .filter(|t| bag.binary_search(t).is_ok())
                .cloned()
                .collect();

            let score = matched_terms.len() as f64 / terms.len() as f64;
            if matched_terms.is_empty() || score < min_overlap {
                continue;
            }

            topic_matches.push(BackboneMatch {
                topic_id: topic.id,
                domain: domain.clone(),
                subdiscipline: best_subdiscipline(backbone, domain, &terms),
                score,
                matched_terms,
                pinned: false,
            });
        }

        topic_matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.domain.cmp(&b.domain))
        });
        matches.extend(topic_matches);
    }

    tracing::info!(matches = matches.len(), "Backbone mapping complete");
    Ok(matches)
}

/// The subdiscipline sharing the most words with the topic's top terms.
/// Returns None when no subdiscipline overlaps at all.
fn best_subdiscipline(
    backbone: &ScienceBackbone,
    domain: &str,
    terms: &[String],
) -> Option<String> {
    let entry = backbone.domains.get(domain)?;
    let mut best: Option<(usize, &String)> = None;
    for sub in &entry.subdisciplines {
        let words: Vec<String> = sub
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(|w| w.to_lowercase())
            .collect();
        let overlap = terms.iter().filter(|t| words.contains(t)).count();
        if overlap > 0 && best.map(|(n, _)| overlap > n).unwrap_or(true) {
            best = Some((overlap, sub));
        }
    }
    best.map(|(_, sub)| sub.clone())
}
