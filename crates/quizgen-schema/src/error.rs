use thiserror::Error;

use crate::model::AnswerType;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("response is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SchemaError {
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationError> {
        match self {
            SchemaError::Parse(_) => None,
            SchemaError::Validation(error) => Some(error),
        }
    }
}

/// A schema violation, located by a path such as `Questions[2].Answer.AnswerType`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {rule}")]
pub struct ValidationError {
    pub path: String,
    pub rule: Rule,
}

impl ValidationError {
    pub(crate) fn new(path: impl Into<String>, rule: Rule) -> Self {
        Self {
            path: path.into(),
            rule,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rule {
    #[error("{0}")]
    Shape(String),

    #[error("must not be empty")]
    EmptyText,

    #[error("must be at least {min} characters long, got {len}")]
    TooShort { min: usize, len: usize },

    #[error("must be at least {min}, got {value}")]
    WaitTimeTooSmall { min: u32, value: i64 },

    #[error("must be at most {max}, got {value}")]
    WaitTimeTooLarge { max: u32, value: i64 },

    #[error("unknown answer type {0}, expected 0 (true/false) or 1 (multiple choice)")]
    UnknownAnswerType(i64),

    #[error("required for {0} answers")]
    MissingBlock(AnswerType),

    #[error("not allowed for {0} answers")]
    UnexpectedBlock(AnswerType),

    #[error("must contain at least one option")]
    NoOptions,

    #[error("must mark at least one option as correct")]
    NoCorrectOption,

    #[error("must mark exactly one option as correct, found {0}")]
    CorrectCount(usize),

    #[error("must contain exactly {expected} options, found {found}")]
    OptionCount { expected: usize, found: usize },

    #[error("duplicate option text '{0}'")]
    DuplicateOption(String),

    #[error("must contain at least {min} questions, found {found}")]
    TooFewQuestions { min: usize, found: usize },

    #[error("duplicate question '{0}'")]
    DuplicateQuestion(String),

    #[error("must contain at least one {0} question")]
    MissingKind(AnswerType),
}
