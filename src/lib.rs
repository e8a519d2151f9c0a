//! Narramap turns free-text stakeholder narratives into structured
//! scientific-variable mappings: a corpus of interview transcripts, survey
//! answers, and scanned workshop notes goes in; topic-domain tables,
//! decision-component spans, and links into a curated Scientific Variable
//! Object catalog come out.
//!
//! The pipeline is a strictly forward, one-shot sequence (load,
//! preprocess, topic-model, map, extract, link, report) driven by a
//! single JSON run configuration. Everything lives in memory for the
//! duration of a run; the only outputs are the flat files the reporter
//! writes.

pub mod config;
pub mod models;
pub mod pipeline;
pub mod report;

pub use config::RunConfig;
pub use pipeline::{PipelineError, PipelineRunner, RunOutcome};
