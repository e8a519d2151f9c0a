//! Run configuration.
//!
//! A single JSON file drives each run: input/output locations, the two
//! user-edited dictionaries (science backbone, SVO catalog), and the scalar
//! knobs of the pipeline. Every scalar has a default so a minimal config
//! only names its paths. Validation happens up front and names the
//! offending field.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const APP_NAME: &str = "narramap";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default log filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("{APP_NAME}=info")
}

/// Default output location when `output_dir` is omitted: ~/Narramap/.
pub fn default_output_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Narramap")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config file {path}: {detail}")]
    MalformedConfig { path: PathBuf, detail: String },

    #[error("Could not read dictionary {path}: {source}")]
    DictionaryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed dictionary {path}: {detail}")]
    MalformedDictionary { path: PathBuf, detail: String },

    #[error("Invalid value for {field}: {detail}")]
    InvalidValue { field: &'static str, detail: String },

    #[error("Invalid component pattern for {category}: {detail}")]
    InvalidPattern { category: String, detail: String },

    #[error("Topic pin references unknown domain \"{domain}\" (topic {topic_id})")]
    DanglingPin { topic_id: usize, domain: String },

    #[error("Topic pin references topic {topic_id}, but topic_count is {topic_count}")]
    PinOutOfRange { topic_id: usize, topic_count: usize },
}

/// LDA sampler knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LdaConfig {
    pub iterations: usize,
    pub alpha: f64,
    pub beta: f64,
}

impl Default for LdaConfig {
    fn default() -> Self {
        Self {
            iterations: 200,
            alpha: 0.1,
            beta: 0.01,
        }
    }
}

/// Full run configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub backbone_path: PathBuf,
    pub svo_catalog_path: PathBuf,

    pub topic_count: usize,
    pub max_vocabulary: usize,
    pub min_doc_freq: usize,
    pub min_token_len: usize,
    pub top_terms_per_topic: usize,
    pub seed: u64,
    /// Minimum overlap score for a topic-domain match to be kept.
    pub min_overlap: f64,
    pub lda: LdaConfig,

    /// Additional stopwords merged with the built-in list.
    pub extra_stopwords: Vec<String>,
    /// Extra regex patterns per component category ("goal", "objective", ...).
    pub extra_patterns: BTreeMap<String, Vec<String>>,
    /// Manual topic → domain assignments that bypass scoring.
    pub topic_pins: BTreeMap<usize, String>,
    /// Load documents on a worker pool. Output order stays deterministic.
    pub parallel: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: default_output_dir(),
            backbone_path: PathBuf::from("backbone.json"),
            svo_catalog_path: PathBuf::from("svo_catalog.json"),
            topic_count: 8,
            max_vocabulary: 2000,
            min_doc_freq: 1,
            min_token_len: 3,
            top_terms_per_topic: 10,
            seed: 42,
            min_overlap: 0.1,
            lda: LdaConfig::default(),
            extra_stopwords: Vec::new(),
            extra_patterns: BTreeMap::new(),
            topic_pins: BTreeMap::new(),
            parallel: false,
        }
    }
}

impl RunConfig {
    /// Load and validate a run config from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: RunConfig =
            serde_json::from_str(&raw).map_err(|e| ConfigError::MalformedConfig {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Range-check every scalar. Dictionary contents are validated when the
    /// dictionaries themselves are loaded.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.topic_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "topic_count",
                detail: "must be at least 1".into(),
            });
        }
        if self.max_vocabulary == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_vocabulary",
                detail: "must be at least 1".into(),
            });
        }
        if self.min_doc_freq == 0 {
            return Err(ConfigError::InvalidValue {
                field: "min_doc_freq",
                detail: "must be at least 1".into(),
            });
        }
        if self.top_terms_per_topic == 0 {
            return Err(ConfigError::InvalidValue {
                field: "top_terms_per_topic",
                detail: "must be at least 1".into(),
            });
        }
        if self.lda.iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "lda.iterations",
                detail: "must be at least 1".into(),
            });
        }
        if self.lda.alpha <= 0.0 || !self.lda.alpha.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "lda.alpha",
                detail: format!("must be a positive finite number, got {}", self.lda.alpha),
            });
        }
        if self.lda.beta <= 0.0 || !self.lda.beta.is_finite() {
            return Err(ConfigError::InvalidValue {
                field: "lda.beta",
                detail: format!("must be a positive finite number, got {}", self.lda.beta),
            });
        }
        if !(0.0..=1.0).contains(&self.min_overlap) {
            return Err(ConfigError::InvalidValue {
                field: "min_overlap",
                detail: format!("must be within 0.0..=1.0, got {}", self.min_overlap),
            });
        }
        for topic_id in self.topic_pins.keys() {
            if *topic_id >= self.topic_count {
                return Err(ConfigError::PinOutOfRange {
                    topic_id: *topic_id,
                    topic_count: self.topic_count,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        RunConfig::default().validate().unwrap();
    }

    #[test]
    fn minimal_config_file_gets_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"input_dir": "corpus", "topic_count": 5}"#).unwrap();
        let config = RunConfig::load(&path).unwrap();
        assert_eq!(config.input_dir, PathBuf::from("corpus"));
        assert_eq!(config.topic_count, 5);
        assert_eq!(config.max_vocabulary, 2000);
        assert_eq!(config.lda.iterations, 200);
    }

    #[test]
    fn zero_topic_count_rejected() {
        let config = RunConfig {
            topic_count: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                field: "topic_count",
                ..
            }
        ));
    }

    #[test]
    fn zero_iterations_rejected() {
        let config = RunConfig {
            lda: LdaConfig {
                iterations: 0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_alpha_rejected() {
        let config = RunConfig {
            lda: LdaConfig {
                alpha: -0.5,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_min_overlap_rejected() {
        let config = RunConfig {
            min_overlap: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn pin_beyond_topic_count_rejected() {
        let mut config = RunConfig {
            topic_count: 4,
            ..Default::default()
        };
        config.topic_pins.insert(7, "Hydrology".into());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::PinOutOfRange { topic_id: 7, .. }));
    }

    #[test]
    fn malformed_config_file_names_the_problem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        std::fs::write(&path, r#"{"topic_count": "eight"}"#).unwrap();
        let err = RunConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedConfig { .. }));
    }

    #[test]
    fn missing_config_file_is_a_read_error() {
        let err = RunConfig::load(Path::new("/nonexistent/run.json")).unwrap_err();
        assert!(matches!(err, ConfigError::ConfigRead { .. }));
    }
}
