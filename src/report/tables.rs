//! Delimited tabular exports.
//!
//! Three CSV files per run: topic-domain mappings, decision components,
//! and term-to-variable links. Quoting follows RFC 4180: fields holding
//! the delimiter, quotes, or line breaks are quoted, quotes doubled.

use std::path::{Path, PathBuf};

use crate::models::{BackboneMatch, DecisionComponent, LinkSource, SvoCatalog, SvoLink};

use super::ReportError;

/// Quote a CSV field when needed, doubling embedded quotes.
pub fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_csv(
    path: &Path,
    header: &[&str],
    rows: impl Iterator<Item = Vec<String>>,
) -> Result<(), ReportError> {
    let mut out = String::new();
    out.push_str(&header.join(","));
    out.push('\n');
    for row in rows {
        let escaped: Vec<String> = row.iter().map(|f| csv_escape(f)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    std::fs::write(path, out)?;
    Ok(())
}

/// Write `topic_domains.csv`.
pub fn export_topic_domains(
    out_dir: &Path,
    matches: &[BackboneMatch],
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join("topic_domains.csv");
    write_csv(
        &path,
        &[
            "topic_id",
            "domain",
            "subdiscipline",
            "score",
            "matched_terms",
            "pinned",
        ],
        matches.iter().map(|m| {
            vec![
                m.topic_id.to_string(),
                m.domain.clone(),
                m.subdiscipline.clone().unwrap_or_default(),
                format!("{:.4}", m.score),
                m.matched_terms.join("; "),
                m.pinned.to_string(),
            ]
        }),
    )?;
    Ok(path)
}

/// Write `components.csv`. One row per extracted span.
pub fn export_components(
    out_dir: &Path,
    components: &[DecisionComponent],
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join("components.csv");
    write_csv(
        &path,
        &["document", "category", "span", "offset", "rule"],
        components.iter().map(|c| {
            vec![
                c.document_path.clone(),
                c.category.as_str().to_string(),
                c.span.clone(),
                c.offset.to_string(),
                c.rule.clone(),
            ]
        }),
    )?;
    Ok(path)
}

/// Write `svo_links.csv`, joining each link with its catalog entry.
pub fn export_svo_links(
    out_dir: &Path,
    links: &[SvoLink],
    catalog: &SvoCatalog,
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join("svo_links.csv");

    let mut rows = Vec::with_capacity(links.len());
    for link in links {
        let entry = catalog
            .get(&link.variable)
            .ok_or_else(|| ReportError::UnknownVariable(link.variable.clone()))?;
        let (source_kind, source_detail) = match &link.source {
            LinkSource::TopicTerm { topic_id, term } => {
                ("topic_term".to_string(), format!("topic {topic_id}: {term}"))
            }
            LinkSource::Component {
                document_path,
                category,
            } => (
                "component".to_string(),
                format!("{document_path} ({})", category.as_str()),
            ),
        };
        rows.push(vec![
            source_kind,
            source_detail,
            link.variable.clone(),
            entry.standard_name.clone(),
            entry.units.clone(),
            entry.data_source.clone(),
            entry.domain.clone(),
            link.matched_phrase.clone(),
        ]);
    }

    write_csv(
        &path,
        &[
            "source_kind",
            "source",
            "variable",
            "standard_name",
            "units",
            "data_source",
            "domain",
            "matched_phrase",
        ],
        rows.into_iter(),
    )?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ComponentCategory, SourceDocument};

    #[test]
    fn plain_fields_unquoted() {
        assert_eq!(csv_escape("nitrate"), "nitrate");
        assert_eq!(csv_escape("topic 3"), "topic 3");
    }

    #[test]
    fn comma_fields_quoted() {
        assert_eq!(csv_escape("a, b"), "\"a, b\"");
    }

    #[test]
    fn quotes_doubled() {
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn newlines_quoted() {
        assert_eq!(csv_escape("line one\nline two"), "\"line one\nline two\"");
    }

    fn component(span: &str) -> DecisionComponent {
        DecisionComponent {
            document_id: SourceDocument::derive_id("doc.txt"),
            document_path: "doc.txt".into(),
            category: ComponentCategory::Constraint,
            span: span.to_string(),
            offset: 0,
            rule: "constraint_phrases".into(),
        }
    }

    #[test]
    fn components_csv_row_count_matches_span_count() {
        let dir = tempfile::tempdir().unwrap();
        let components = vec![
            component("no more than 20 mg/L"),
            component("withdrawals must not exceed recharge"),
        ];
        let path = export_components(dir.path(), &components).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 1 + components.len());
        assert_eq!(lines[0], "document,category,span,offset,rule");
        assert!(lines[1].contains("constraint"));
    }

    #[test]
    fn component_span_with_commas_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let components = vec![component("first, second, and third")];
        let path = export_components(dir.path(), &components).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"first, second, and third\""));
    }

    #[test]
    fn topic_domains_csv_written() {
        let dir = tempfile::tempdir().unwrap();
        let matches = vec![BackboneMatch {
            topic_id: 2,
            domain: "Hydrology".into(),
            subdiscipline: Some("Groundwater".into()),
            score: 0.5,
            matched_terms: vec!["aquifer".into(), "recharge".into()],
            pinned: false,
        }];
        let path = export_topic_domains(dir.path(), &matches).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("2,Hydrology,Groundwater,0.5000,aquifer; recharge,false"));
    }

    #[test]
    fn svo_links_join_catalog_fields() {
        let dir = tempfile::tempdir().unwrap();
        let catalog: SvoCatalog = serde_json::from_value(serde_json::json!({
            "variables": {
                "nitrate_concentration": {
                    "standard_name": "water__nitrate_concentration",
                    "units": "mg/L",
                    "data_source": "EPA STORET",
                    "domain": "Water Quality",
                    "keywords": ["nitrate"]
                }
            }
        }))
        .unwrap();
        let links = vec![SvoLink {
            source: LinkSource::TopicTerm {
                topic_id: 0,
                term: "nitrate".into(),
            },
            variable: "nitrate_concentration".into(),
            matched_phrase: "nitrate".into(),
        }];
        let path = export_svo_links(dir.path(), &links, &catalog).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("water__nitrate_concentration"));
        assert!(written.contains("mg/L"));
        assert!(written.contains("EPA STORET"));
    }

    #[test]
    fn dangling_link_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let links = vec![SvoLink {
            source: LinkSource::TopicTerm {
                topic_id: 0,
                term: "nitrate".into(),
            },
            variable: "missing_key".into(),
            matched_phrase: "nitrate".into(),
        }];
        let result = export_svo_links(dir.path(), &links, &SvoCatalog::default());
        assert!(matches!(result, Err(ReportError::UnknownVariable(_))));
    }
}
