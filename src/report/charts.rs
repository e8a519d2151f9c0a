//! Interactive chart exports.
//!
//! One JSON dataset per chart plus a single self-contained HTML page that
//! embeds the datasets inline and renders them with a small script. No
//! network fetches: the page renders from local disk, offline.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::models::{BackboneMatch, Corpus, Topic};

use super::ReportError;

#[derive(Serialize)]
struct TopicTermsChart {
    topics: Vec<TopicTermsRow>,
}

#[derive(Serialize)]
struct TopicTermsRow {
    topic: usize,
    terms: Vec<TermWeight>,
}

#[derive(Serialize)]
struct TermWeight {
    term: String,
    weight: f64,
}

#[derive(Serialize)]
struct DocTopicsChart {
    documents: Vec<String>,
    topic_count: usize,
    /// weights[d][k]: membership of document d in topic k.
    weights: Vec<Vec<f64>>,
}

#[derive(Serialize)]
struct DomainMatchesChart {
    matches: Vec<DomainMatchRow>,
}

#[derive(Serialize)]
struct DomainMatchRow {
    topic: usize,
    domain: String,
    score: f64,
    pinned: bool,
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ReportError> {
    std::fs::write(path, serde_json::to_vec_pretty(value)?)?;
    Ok(())
}

/// Write the three chart datasets and the HTML page. Returns the paths
/// written, for the run index.
pub fn write_charts(
    out_dir: &Path,
    topics: &[Topic],
    corpus: &Corpus,
    matches: &[BackboneMatch],
) -> Result<Vec<PathBuf>, ReportError> {
    let topic_terms = TopicTermsChart {
        topics: topics
            .iter()
            .map(|t| TopicTermsRow {
                topic: t.id,
                terms: t
                    .top_terms
                    .iter()
                    .map(|tt| TermWeight {
                        term: tt.term.clone(),
                        weight: tt.weight,
                    })
                    .collect(),
            })
            .collect(),
    };

    let doc_topics = DocTopicsChart {
        documents: corpus
            .documents
            .iter()
            .map(|d| d.relative_path.clone())
            .collect(),
        topic_count: topics.len(),
        weights: (0..corpus.documents.len())
            .map(|d| topics.iter().map(|t| t.document_weights[d]).collect())
            .collect(),
    };

    let domain_matches = DomainMatchesChart {
        matches: matches
            .iter()
            .map(|m| DomainMatchRow {
                topic: m.topic_id,
                domain: m.domain.clone(),
                score: m.score,
                pinned: m.pinned,
            })
            .collect(),
    };

    let mut written = Vec::new();

    let topic_terms_path = out_dir.join("chart.topic_terms.json");
    write_json(&topic_terms_path, &topic_terms)?;
    written.push(topic_terms_path);

    let doc_topics_path = out_dir.join("chart.doc_topics.json");
    write_json(&doc_topics_path, &doc_topics)?;
    written.push(doc_topics_path);

    let domain_matches_path = out_dir.join("chart.domain_matches.json");
    write_json(&domain_matches_path, &domain_matches)?;
    written.push(domain_matches_path);

    let html = CHART_TEMPLATE
        .replace("__TOPIC_TERMS__", &serde_json::to_string(&topic_terms)?)
        .replace("__DOC_TOPICS__", &serde_json::to_string(&doc_topics)?)
        .replace(
            "__DOMAIN_MATCHES__",
            &serde_json::to_string(&domain_matches)?,
        );
    let html_path = out_dir.join("charts.html");
    std::fs::write(&html_path, html)?;
    written.push(html_path);

    Ok(written)
}

const CHART_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Narramap run charts</title>
<style>
  body { font-family: system-ui, sans-serif; margin: 2rem; color: #222; }
  h2 { margin-top: 2.5rem; }
  .bar-row { display: flex; align-items: center; margin: 2px 0; }
  .bar-label { width: 220px; font-size: 13px; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
  .bar { height: 14px; background: #4877b8; margin-right: 6px; }
  .bar.pinned { background: #b85948; }
  .bar-value { font-size: 12px; color: #666; }
  .topic-block { margin-bottom: 1.25rem; }
  .topic-title { font-weight: 600; margin-bottom: 4px; }
</style>
</head>
<body>
<h1>Narramap run charts</h1>
<h2>Topic term weights</h2>
<div id="topic-terms"></div>
<h2>Document topic mixtures</h2>
<div id="doc-topics"></div>
<h2>Topic-domain match scores</h2>
<div id="domain-matches"></div>
<script>
const TOPIC_TERMS = __TOPIC_TERMS__;
const DOC_TOPICS = __DOC_TOPICS__;
const DOMAIN_MATCHES = __DOMAIN_MATCHES__;

function bar(parent, label, value, max, pinned) {
  const row = document.createElement("div");
  row.className = "bar-row";
  const name = document.createElement("div");
  name.className = "bar-label";
  name.textContent = label;
  name.title = label;
  const fill = document.createElement("div");
  fill.className = pinned ? "bar pinned" : "bar";
  fill.style.width = Math.max(1, 400 * value / max) + "px";
  const val = document.createElement("div");
  val.className = "bar-value";
  val.textContent = value.toFixed(3);
  row.append(name, fill, val);
  parent.appendChild(row);
}

const termsRoot = document.getElementById("topic-terms");
for (const t of TOPIC_TERMS.topics) {
  const block = document.createElement("div");
  block.className = "topic-block";
  const title = document.createElement("div");
  title.className = "topic-title";
  title.textContent = "Topic " + t.topic;
  block.appendChild(title);
  const max = Math.max(...t.terms.map(x => x.weight), 1e-9);
  for (const x of t.terms) bar(block, x.term, x.weight, max, false);
  termsRoot.appendChild(block);
}

const docsRoot = document.getElementById("doc-topics");
DOC_TOPICS.documents.forEach((doc, d) => {
  const block = document.createElement("div");
  block.className = "topic-block";
  const title = document.createElement("div");
  title.className = "topic-title";
  title.textContent = doc;
  block.appendChild(title);
  const weights = DOC_TOPICS.weights[d];
  const max = Math.max(...weights, 1e-9);
  weights.forEach((w, k) => bar(block, "topic " + k, w, max, false));
  docsRoot.appendChild(block);
});

const matchRoot = document.getElementById("domain-matches");
for (const m of DOMAIN_MATCHES.matches) {
  bar(matchRoot, "topic " + m.topic + " → " + m.domain, m.score, 1, m.pinned);
}
</script>
</body>
</html>
"#;
