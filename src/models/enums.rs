use serde::{Deserialize, Serialize};

/// Category of a tagged decision component. Closed set: every extracted
/// span carries exactly one of these five labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComponentCategory {
    Goal,
    Objective,
    Variable,
    Constraint,
    Indicator,
}

impl ComponentCategory {
    pub const ALL: [ComponentCategory; 5] = [
        Self::Goal,
        Self::Objective,
        Self::Variable,
        Self::Constraint,
        Self::Indicator,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Objective => "objective",
            Self::Variable => "variable",
            Self::Constraint => "constraint",
            Self::Indicator => "indicator",
        }
    }
}

/// How text was obtained from a source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    PlainTextRead,
    JsonFlatten,
    Ocr,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlainTextRead => "plain_text_read",
            Self::JsonFlatten => "json_flatten",
            Self::Ocr => "ocr",
        }
    }
}
