use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::{RunConfig, APP_NAME, APP_VERSION};
use crate::models::{ComponentCategory, Corpus, MappingResult, Topic};
use crate::pipeline::preprocess::{DocumentVectors, Vocabulary};

use super::ReportError;

/// Write the narrative Markdown summary for a run.
pub fn write_summary(
    out_dir: &Path,
    config: &RunConfig,
    corpus: &Corpus,
    vocab: &Vocabulary,
    vectors: &DocumentVectors,
    topics: &[Topic],
    result: &MappingResult,
) -> Result<PathBuf, ReportError> {
    let mut md = String::new();

    writeln!(md, "# Narramap run summary").ok();
    writeln!(md).ok();
    writeln!(md, "Generated {} by {APP_NAME} v{APP_VERSION}.", chrono::Local::now().to_rfc3339()).ok();
    writeln!(md).ok();

    writeln!(md, "## Parameters").ok();
    writeln!(md).ok();
    writeln!(md, "- Input: `{}`", config.input_dir.display()).ok();
    writeln!(md, "- Topics: {} (seed {})", config.topic_count, config.seed).ok();
    writeln!(
        md,
        "- Vocabulary: {} terms (cap {}, min document frequency {})",
        vocab.len(),
        config.max_vocabulary,
        config.min_doc_freq
    )
    .ok();
    writeln!(
        md,
        "- LDA: {} iterations, alpha {}, beta {}",
        config.lda.iterations, config.lda.alpha, config.lda.beta
    )
    .ok();
    writeln!(md).ok();

    writeln!(md, "## Corpus").ok();
    writeln!(md).ok();
    writeln!(
        md,
        "{} documents loaded, {} files skipped.",
        corpus.len(),
        corpus.skipped.len()
    )
    .ok();
    writeln!(md).ok();
    for (d, document) in corpus.documents.iter().enumerate() {
        let distinctive: Vec<String> = vectors.tfidf[d]
            .iter()
            .take(3)
            .map(|&(id, _)| vocab.term(id).to_string())
            .collect();
        writeln!(
            md,
            "- `{}` ({}) — distinctive terms: {}",
            document.relative_path,
            document.method.as_str(),
            if distinctive.is_empty() {
                "none".to_string()
            } else {
                distinctive.join(", ")
            }
        )
        .ok();
    }
    if !corpus.skipped.is_empty() {
        writeln!(md).ok();
        writeln!(md, "Skipped:").ok();
        writeln!(md).ok();
        for skip in &corpus.skipped {
            writeln!(md, "- `{}`: {}", skip.path.display(), skip.reason).ok();
        }
    }
    writeln!(md).ok();

    writeln!(md, "## Topics").ok();
    writeln!(md).ok();
    for topic in topics {
        let terms: Vec<String> = topic
            .top_terms
            .iter()
            .map(|t| format!("{} ({:.3})", t.term, t.weight))
            .collect();
        let best_domain = result
            .backbone_matches
            .iter()
            .filter(|m| m.topic_id == topic.id)
            .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal));
        writeln!(md, "### Topic {}", topic.id).ok();
        writeln!(md).ok();
        writeln!(md, "- Terms: {}", terms.join(", ")).ok();
        match best_domain {
            Some(m) => {
                writeln!(
                    md,
                    "- Domain: {}{} (score {:.2}{})",
                    m.domain,
                    m.subdiscipline
                        .as_deref()
                        .map(|s| format!(" / {s}"))
                        .unwrap_or_default(),
                    m.score,
                    if m.pinned { ", pinned" } else { "" }
                )
                .ok();
            }
            None => {
                writeln!(md, "- Domain: unmatched").ok();
            }
        }
        writeln!(md).ok();
    }

    writeln!(md, "## Decision components").ok();
    writeln!(md).ok();
    for category in ComponentCategory::ALL {
        let count = result
            .components
            .iter()
            .filter(|c| c.category == category)
            .count();
        writeln!(md, "- {}: {}", category.as_str(), count).ok();
    }
    writeln!(md).ok();

    writeln!(md, "## Variable links").ok();
    writeln!(md).ok();
    writeln!(
        md,
        "{} links into the SVO catalog.",
        result.svo_links.len()
    )
    .ok();

    let path = out_dir.join("run_summary.md");
    std::fs::write(&path, md)?;
    Ok(path)
}

#[derive(Serialize)]
struct RunIndex<'a> {
    app: &'static str,
    version: &'static str,
    generated_at: String,
    config: &'a RunConfig,
    artifacts: Vec<String>,
}

/// Write `run.json`: the artifact index plus a configuration echo.
pub fn write_run_index(
    out_dir: &Path,
    config: &RunConfig,
    artifacts: &[PathBuf],
) -> Result<PathBuf, ReportError> {
    let index = RunIndex {
        app: APP_NAME,
        version: APP_VERSION,
        generated_at: chrono::Local::now().to_rfc3339(),
        config,
        artifacts: artifacts
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect(),
    };
    let path = out_dir.join("run.json");
    std::fs::write(&path, serde_json::to_vec_pretty(&index)?)?;
    Ok(path)
}
