use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use narramap::config::{self, RunConfig};
use narramap::PipelineRunner;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("narramap starting v{}", config::APP_VERSION);

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("narramap.json"));

    let run_config = RunConfig::load(&config_path)
        .with_context(|| format!("loading run config {}", config_path.display()))?;

    let outcome = PipelineRunner::new().run(&run_config)?;

    tracing::info!(
        documents = outcome.documents,
        skipped = outcome.skipped,
        vocabulary = outcome.vocabulary_size,
        topics = outcome.topic_count,
        backbone_matches = outcome.backbone_matches,
        components = outcome.components,
        svo_links = outcome.svo_links,
        "Run complete — artifacts in {}",
        outcome.output_dir.display()
    );

    Ok(())
}
