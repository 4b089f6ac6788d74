//! Transformation operations and the instruction each one sends.

use std::fmt;
use std::str::FromStr;

use super::error::TransformError;

/// Target languages offered in the translate menu.
pub const LANGUAGES: &[&str] = &["English", "Dutch", "French", "Spanish", "German", "Russian"];

/// Target sentiments offered in the change-sentiment menu.
pub const SENTIMENTS: &[&str] = &[
    "Layman",
    "Friendly",
    "Formal",
    "Informal",
    "Assertive",
    "Empathetic",
    "Sarcastic",
    "Emoji",
];

/// Which transformation the user picked, without its parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    Proofread,
    Translate,
    Sentiment,
}

impl OperationKind {
    pub const ALL: [OperationKind; 3] = [
        OperationKind::Proofread,
        OperationKind::Translate,
        OperationKind::Sentiment,
    ];

    /// Button label shown in the panel.
    pub fn label(&self) -> &'static str {
        match self {
            OperationKind::Proofread => "Proofread",
            OperationKind::Translate => "Translate",
            OperationKind::Sentiment => "Change Sentiment",
        }
    }

    /// Whether the operation carries a free-form parameter.
    pub fn takes_parameter(&self) -> bool {
        !matches!(self, OperationKind::Proofread)
    }

    /// Menu entries offered for the parameter, empty for proofread.
    pub fn presets(&self) -> &'static [&'static str] {
        match self {
            OperationKind::Proofread => &[],
            OperationKind::Translate => LANGUAGES,
            OperationKind::Sentiment => SENTIMENTS,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OperationKind::Proofread => "proofread",
            OperationKind::Translate => "translate",
            OperationKind::Sentiment => "sentiment",
        };
        f.write_str(name)
    }
}

impl FromStr for OperationKind {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "proofread" => Ok(OperationKind::Proofread),
            "translate" => Ok(OperationKind::Translate),
            "sentiment" | "change sentiment" => Ok(OperationKind::Sentiment),
            other => Err(TransformError::InvalidOperationParameter(format!(
                "unknown operation '{}'",
                other
            ))),
        }
    }
}

/// A validated operation: the parameter is present exactly when the kind needs one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Proofread,
    Translate { language: String },
    Sentiment { sentiment: String },
}

impl Operation {
    /// Pair a kind with its optional parameter, rejecting mismatches.
    ///
    /// Translate and sentiment need a non-blank parameter; proofread must not get one.
    pub fn new(kind: OperationKind, parameter: Option<&str>) -> Result<Self, TransformError> {
        let parameter = parameter.map(str::trim);

        match (kind, parameter) {
            (OperationKind::Proofread, None) => Ok(Operation::Proofread),
            (OperationKind::Proofread, Some(p)) => Err(TransformError::InvalidOperationParameter(
                format!("proofread takes no parameter, got '{}'", p),
            )),
            (OperationKind::Translate, Some(p)) if !p.is_empty() => Ok(Operation::Translate {
                language: p.to_string(),
            }),
            (OperationKind::Sentiment, Some(p)) if !p.is_empty() => Ok(Operation::Sentiment {
                sentiment: p.to_string(),
            }),
            (kind, _) => Err(TransformError::InvalidOperationParameter(format!(
                "{} requires a non-empty parameter",
                kind
            ))),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::Proofread => OperationKind::Proofread,
            Operation::Translate { .. } => OperationKind::Translate,
            Operation::Sentiment { .. } => OperationKind::Sentiment,
        }
    }

    pub fn parameter(&self) -> Option<&str> {
        match self {
            Operation::Proofread => None,
            Operation::Translate { language } => Some(language),
            Operation::Sentiment { sentiment } => Some(sentiment),
        }
    }

    /// The system instruction sent ahead of the selected text.
    pub fn instruction(&self) -> String {
        build_instruction(self)
    }
}

/// Build the system instruction for an operation.
pub fn build_instruction(operation: &Operation) -> String {
    match operation {
        Operation::Proofread => "Please correct and improve the following text in its source language, but don't change the source language:".to_string(),
        Operation::Translate { language } => format!(
            "Please translate the following text to {}, but keep the source language:",
            language
        ),
        Operation::Sentiment { sentiment } => format!(
            "Please change the sentiment of the following text to be more {}, but keep the source language:",
            sentiment
        ),
    }
}
