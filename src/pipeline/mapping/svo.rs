use std::collections::HashSet;

use super::contains_word;
use crate::models::{DecisionComponent, LinkSource, SvoCatalog, SvoLink, Topic};

/// Link topic top-terms and extracted component spans to SVO catalog
/// entries.
///
/// Matching is case-insensitive and whole-word. A topic term matches a
/// catalog phrase when they are equal or the term is one word of a
/// multi-word phrase; a component span matches when the phrase appears in
/// the span. Every produced link carries a key present in the catalog by
/// construction.
pub fn link_terms(
    topics: &[Topic],
    components: &[DecisionComponent],
    catalog: &SvoCatalog,
) -> Vec<SvoLink> {
    let phrases = catalog.match_phrases();
    let mut links = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for topic in topics {
        for term in topic.term_set() {
            for (phrase, key) in &phrases {
                let hit = phrase == &term || contains_word(phrase, &term);
                if !hit {
                    continue;
                }
                let dedup_key = format!("t:{}:{}:{}", topic.id, term, key);
                if seen.insert(dedup_key) {
                    links.push(SvoLink {
                        source: LinkSource::TopicTerm {
                            topic_id: topic.id,
                            term: term.clone(),
                        },
                        variable: key.clone(),
                        matched_phrase: phrase.clone(),
                    });
                }
            }
        }
    }

    for component in components {
        let span_lower = component.span.to_lowercase();
        for (phrase, key) in &phrases {
            if !contains_word(&span_lower, phrase) {
                continue;
            }
            let dedup_key = format!(
                "c:{}:{}:{}",
                component.document_id,
                component.offset,
                key
            );
            if seen.insert(dedup_key) {
                links.push(SvoLink {
                    source: LinkSource::Component {
                        document_path: component.document_path.clone(),
                        category: component.category,
                    },
                    variable: key.clone(),
                    matched_phrase: phrase.clone(),
                });
            }
        }
    }

    tracing::info!(links = links.len(), "SVO linking complete");
    links
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentCategory, SourceDocument, TopicTerm};

    fn catalog() -> SvoCatalog {
        serde_json::from_value(serde_json::json!({
            "variables": {
                "water_temperature": {
                    "standard_name": "water__temperature",
                    "units": "degC",
                    "data_source": "USGS NWIS",
                    "domain": "Hydrology",
                    "keywords": ["stream temperature", "thermal"]
                },
                "nitrate_concentration": {
                    "standard_name": "water__nitrate_concentration",
                    "units": "mg/L",
                    "data_source": "EPA STORET",
                    "domain": "Water Quality",
                    "keywords": ["nitrate", "nutrient load"]
                }
            }
        }))
        .unwrap()
    }

    fn topic(id: usize, terms: &[&str]) -> Topic {
        Topic {
            id,
            top_terms: terms
                .iter()
                .map(|t| TopicTerm {
                    term: t.to_string(),
                    weight: 0.1,
                })
                .collect(),
            document_weights: vec![],
        }
    }

    fn component(span: &str, category: ComponentCategory) -> DecisionComponent {
        DecisionComponent {
            document_id: SourceDocument::derive_id("doc.txt"),
            document_path: "doc.txt".into(),
            category,
            span: span.to_string(),
            offset: 0,
            rule: "test".into(),
        }
    }

    #[test]
    fn topic_term_links_to_keyword() {
        let links = link_terms(&[topic(0, &["nitrate", "runoff"])], &[], &catalog());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].variable, "nitrate_concentration");
        assert!(matches!(
            links[0].source,
            LinkSource::TopicTerm { topic_id: 0, .. }
        ));
    }

    #[test]
    fn topic_term_matches_word_of_multiword_phrase() {
        let links = link_terms(&[topic(1, &["temperature"])], &[], &catalog());
        assert!(!links.is_empty());
        assert!(links.iter().all(|l| l.variable == "water_temperature"));
    }

    #[test]
    fn component_span_links_to_phrase() {
        let components = vec![component(
            "Keep the stream temperature below 18 degrees in summer",
            ComponentCategory::Constraint,
        )];
        let links = link_terms(&[], &components, &catalog());
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].variable, "water_temperature");
        assert_eq!(links[0].matched_phrase, "stream temperature");
    }

    #[test]
    fn every_link_references_a_catalog_key() {
        let cat = catalog();
        let components = vec![
            component("reduce nitrate and nutrient load", ComponentCategory::Objective),
            component("thermal refuge for salmon", ComponentCategory::Variable),
        ];
        let links = link_terms(&[topic(0, &["nitrate", "thermal"])], &components, &cat);
        assert!(!links.is_empty());
        for link in &links {
            assert!(
                cat.get(&link.variable).is_some(),
                "dangling key: {}",
                link.variable
            );
        }
    }

    #[test]
    fn no_partial_word_matches() {
        let components = vec![component(
            "nitrates are discussed here",
            ComponentCategory::Variable,
        )];
        // "nitrate" must not match inside "nitrates"
        let links = link_terms(&[], &components, &catalog());
        assert!(links.is_empty());
    }

    #[test]
    fn duplicate_hits_deduplicated() {
        let components = vec![component(
            "nitrate nitrate nitrate",
            ComponentCategory::Variable,
        )];
        let links = link_terms(&[], &components, &catalog());
        assert_eq!(links.len(), 1);
    }

    #[test]
    fn empty_catalog_yields_no_links() {
        let empty = SvoCatalog::default();
        let links = link_terms(&[topic(0, &["nitrate"])], &[], &empty);
        assert!(links.is_empty());
    }
}
