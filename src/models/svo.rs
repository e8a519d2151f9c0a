use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// A standardized Scientific Variable Object record. Supplied as static
/// configuration, looked up but never modified by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SvoEntry {
    pub standard_name: String,
    pub units: String,
    pub data_source: String,
    pub domain: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// The SVO vocabulary, keyed by variable name. BTreeMap keeps lookup and
/// reporting order deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SvoCatalog {
    pub variables: BTreeMap<String, SvoEntry>,
}

impl SvoCatalog {
    /// Load the catalog from a JSON file. An empty catalog is allowed (the
    /// linker then produces no links); a malformed file is not.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::DictionaryRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::MalformedDictionary {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&SvoEntry> {
        self.variables.get(key)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Matchable phrases per variable: the key itself, the standard name,
    /// and every keyword, lowercased. Order follows the catalog key order.
    pub fn match_phrases(&self) -> Vec<(String, String)> {
        let mut phrases = Vec::new();
        for (key, entry) in &self.variables {
            phrases.push((key.to_lowercase(), key.clone()));
            phrases.push((entry.standard_name.to_lowercase(), key.clone()));
            for kw in &entry.keywords {
                phrases.push((kw.to_lowercase(), key.clone()));
            }
        }
        phrases
    }
}
