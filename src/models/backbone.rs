use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// One domain of the science backbone: its subdisciplines plus optional
/// extra keywords to strengthen topic matching.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainEntry {
    #[serde(default)]
    pub subdisciplines: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// User-supplied two-level taxonomy of scientific domains and
/// subdisciplines. Read-only during a run. Domains are kept in a BTreeMap
/// so matching and reporting iterate in a deterministic order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScienceBackbone {
    pub domains: BTreeMap<String, DomainEntry>,
}

impl ScienceBackbone {
    /// Load the backbone dictionary from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::DictionaryRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let backbone: ScienceBackbone =
            serde_json::from_str(&raw).map_err(|e| ConfigError::MalformedDictionary {
                path: path.to_path_buf(),
                detail: e.to_string(),
            })?;
        if backbone.domains.is_empty() {
            return Err(ConfigError::MalformedDictionary {
                path: path.to_path_buf(),
                detail: "backbone has no domains".into(),
            });
        }
        Ok(backbone)
    }

    pub fn contains_domain(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    /// All matchable words for a domain: its name, subdiscipline names, and
    /// keywords, lowercased and split into single tokens.
    pub fn keyword_bag(&self, domain: &str) -> Vec<String> {
        let mut bag = Vec::new();
        let Some(entry) = self.domains.get(domain) else {
            return bag;
        };
        push_words(&mut bag, domain);
        for sub in &entry.subdisciplines {
            push_words(&mut bag, sub);
        }
        for kw in &entry.keywords {
            push_words(&mut bag, kw);
        }
        bag.sort();
        bag.dedup();
        bag
    }
}

fn push_words(bag: &mut Vec<String>, phrase: &str) {
    for word in phrase.split(|c: char| !c.is_alphanumeric()) {
        if !word.is_empty() {
            bag.push(word.to_lowercase());
        }
    }
}
