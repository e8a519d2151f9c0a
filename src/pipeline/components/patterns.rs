use std::collections::BTreeMap;

use regex::Regex;

use crate::config::ConfigError;
use crate::models::ComponentCategory;

/// One tagging rule: a labeled regex that assigns a category to any
/// sentence it matches.
#[derive(Debug)]
pub struct PatternRule {
    pub label: String,
    pub category: ComponentCategory,
    pub regex: Regex,
}

/// The active rule set: built-in rules first, user extensions after.
/// Rule order matters: the first matching rule tags a sentence.
#[derive(Debug)]
pub struct RuleSet {
    pub rules: Vec<PatternRule>,
}

impl RuleSet {
    /// Built-in rules plus user-supplied extra patterns per category.
    /// An unknown category name or an invalid regex is a configuration
    /// error.
    pub fn build(extra_patterns: &BTreeMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut rules = built_in_rules();

        for (category_name, patterns) in extra_patterns {
            let category = parse_category(category_name).ok_or_else(|| {
                ConfigError::InvalidPattern {
                    category: category_name.clone(),
                    detail: "unknown category (expected goal, objective, variable, \
                             constraint, or indicator)"
                        .into(),
                }
            })?;
            for (i, pattern) in patterns.iter().enumerate() {
                let regex = Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern {
                    category: category_name.clone(),
                    detail: e.to_string(),
                })?;
                rules.push(PatternRule {
                    label: format!("{}_user_{}", category.as_str(), i),
                    category,
                    regex,
                });
            }
        }

        Ok(Self { rules })
    }
}

fn parse_category(name: &str) -> Option<ComponentCategory> {
    match name {
        "goal" => Some(ComponentCategory::Goal),
        "objective" => Some(ComponentCategory::Objective),
        "variable" => Some(ComponentCategory::Variable),
        "constraint" => Some(ComponentCategory::Constraint),
        "indicator" => Some(ComponentCategory::Indicator),
        _ => None,
    }
}

fn built_in_rules() -> Vec<PatternRule> {
    let specs: [(&str, ComponentCategory, &str); 5] = [
        (
            "goal_phrases",
            ComponentCategory::Goal,
            r"(?i)\b(goals?|aims?|vision|mission|purpose|want(s)? to|hope(s)? to|strive(s)? to|aspire(s)? to)\b",
        ),
        (
            "objective_phrases",
            ComponentCategory::Objective,
            r"(?i)\b(objectives?|targets?|in order to|so that|intend(s|ed)? to|seek(s|ing)? to|by \d{4})\b",
        ),
        (
            "variable_phrases",
            ComponentCategory::Variable,
            r"(?i)\b(measure(d|s|ment|ments)?|concentrations?|levels? of|rates? of|amounts? of|temperature|salinity|discharge|abundance|density|depth|flow)\b",
        ),
        (
            "constraint_phrases",
            ComponentCategory::Constraint,
            r"(?i)\b(must( not)?|cannot|can't|limits?|limited|restricts?|restricted|restrictions?|thresholds?|no more than|at least|at most|required|regulations?|permits?|budget)\b",
        ),
        (
            "indicator_phrases",
            ComponentCategory::Indicator,
            r"(?i)\b(indicators?|indices|index|metrics?|benchmarks?|criteri(a|on)|signals?|prox(y|ies))\b",
        ),
    ];

    specs
        .into_iter()
        .map(|(label, category, pattern)| PatternRule {
            label: label.to_string(),
            category,
            regex: Regex::new(pattern).expect("built-in pattern"),
        })
        .collect()
}
