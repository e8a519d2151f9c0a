//! Run orchestrator.
//!
//! Single entry point that drives the full pipeline:
//! load → preprocess → topic model → backbone map → extract components →
//! link variables → report. Each stage consumes the previous stage's
//! output; nothing feeds back. The OCR engine is injected so the whole
//! pipeline stays testable without Tesseract.

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{ConfigError, RunConfig};
use crate::models::{MappingResult, ScienceBackbone, SvoCatalog};
use crate::pipeline::components::{extract_components, RuleSet};
use crate::pipeline::extraction::{default_ocr_engine, OcrEngine};
use crate::pipeline::import::{load_corpus, ImportError};
use crate::pipeline::mapping::{link_terms, map_topics};
use crate::pipeline::preprocess::{
    tokenize, vectorize, PreprocessError, Stopwords, Vocabulary,
};
use crate::pipeline::topics::{self, LdaParams, TopicModelError};
use crate::report::{
    export_components, export_svo_links, export_topic_domains, write_charts, write_run_index,
    write_summary, ReportError,
};

/// Errors that can abort a run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Import failed: {0}")]
    Import(#[from] ImportError),

    #[error("Preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),

    #[error("Topic model failed: {0}")]
    TopicModel(#[from] TopicModelError),

    #[error("Reporting failed: {0}")]
    Report(#[from] ReportError),

    #[error("Could not create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Summary of a completed run.
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub documents: usize,
    pub skipped: usize,
    pub vocabulary_size: usize,
    pub topic_count: usize,
    pub backbone_matches: usize,
    pub components: usize,
    pub svo_links: usize,
    pub output_dir: PathBuf,
    pub artifacts: Vec<PathBuf>,
}

/// Drives one full pipeline run.
pub struct PipelineRunner {
    ocr: Option<Box<dyn OcrEngine>>,
}

impl PipelineRunner {
    /// Runner with the default OCR engine, when the build carries one.
    pub fn new() -> Self {
        Self {
            ocr: default_ocr_engine(),
        }
    }

    /// Runner with an injected OCR engine (tests, alternative backends).
    pub fn with_ocr_engine(engine: Box<dyn OcrEngine>) -> Self {
        Self { ocr: Some(engine) }
    }

    /// Runner that treats image files as unreadable.
    pub fn without_ocr() -> Self {
        Self { ocr: None }
    }

    /// Execute the full pipeline for one configuration. Runs to
    /// completion or aborts on the first error; nothing is retried.
    pub fn run(&self, config: &RunConfig) -> Result<RunOutcome, PipelineError> {
        config.validate()?;

        // Dictionaries and rules first: a malformed configuration should
        // fail before any corpus work starts.
        let backbone = ScienceBackbone::from_path(&config.backbone_path)?;
        let catalog = SvoCatalog::from_path(&config.svo_catalog_path)?;
        let rules = RuleSet::build(&config.extra_patterns)?;
        tracing::info!(
            domains = backbone.domains.len(),
            variables = catalog.len(),
            rules = rules.rules.len(),
            "Configuration loaded"
        );

        // Stage 1: load
        let corpus = load_corpus(&config.input_dir, self.ocr.as_deref(), config.parallel)?;

        // Stage 2: preprocess
        let stopwords = Stopwords::new(&config.extra_stopwords);
        let token_streams: Vec<Vec<String>> = corpus
            .documents
            .iter()
            .map(|d| tokenize(&d.text, config.min_token_len, &stopwords))
            .collect();
        let vocab = Vocabulary::build(&token_streams, config.min_doc_freq, config.max_vocabulary)?;
        let vectors = vectorize(&token_streams, &vocab);
        tracing::info!(vocabulary = vocab.len(), "Preprocessing complete");

        // Stage 3: topic model
        let model = topics::fit(
            &vectors.token_streams,
            vocab.len(),
            &LdaParams {
                topic_count: config.topic_count,
                iterations: config.lda.iterations,
                alpha: config.lda.alpha,
                beta: config.lda.beta,
                seed: config.seed,
            },
        )?;
        let topic_list = model.topics(&vocab, config.top_terms_per_topic);

        // Stage 4: backbone mapping
        let backbone_matches =
            map_topics(&topic_list, &backbone, &config.topic_pins, config.min_overlap)?;

        // Stage 5: component extraction
        let components = extract_components(&corpus, &rules);

        // Stage 6: SVO linking
        let svo_links = link_terms(&topic_list, &components, &catalog);

        let result = MappingResult {
            backbone_matches,
            components,
            svo_links,
        };

        // Stage 7: report
        std::fs::create_dir_all(&config.output_dir).map_err(|e| PipelineError::OutputDir {
            path: config.output_dir.clone(),
            source: e,
        })?;

        let mut artifacts = Vec::new();
        artifacts.push(export_topic_domains(
            &config.output_dir,
            &result.backbone_matches,
        )?);
        artifacts.push(export_components(&config.output_dir, &result.components)?);
        artifacts.push(export_svo_links(
            &config.output_dir,
            &result.svo_links,
            &catalog,
        )?);
        artifacts.extend(write_charts(
            &config.output_dir,
            &topic_list,
            &corpus,
            &result.backbone_matches,
        )?);
        artifacts.push(write_summary(
            &config.output_dir,
            config,
            &corpus,
            &vocab,
            &vectors,
            &topic_list,
            &result,
        )?);
        let index = write_run_index(&config.output_dir, config, &artifacts)?;
        artifacts.push(index);

        for artifact in &artifacts {
            tracing::info!(path = %artifact.display(), "Artifact written");
        }

        Ok(RunOutcome {
            documents: corpus.len(),
            skipped: corpus.skipped.len(),
            vocabulary_size: vocab.len(),
            topic_count: config.topic_count,
            backbone_matches: result.backbone_matches.len(),
            components: result.components.len(),
            svo_links: result.svo_links.len(),
            output_dir: config.output_dir.clone(),
            artifacts,
        })
    }
}

impl Default for PipelineRunner {
    fn default() -> Self {
        Self::new()
    }
}
