use quizgen_schema::SchemaError;
use thiserror::Error;

use crate::llm_config::ConfigError;
use crate::openai::error::TransportError;
use crate::persist::PersistError;

/// Everything that can end a generation run. None of these are recovered from.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("validation error: {0}")]
    Validation(#[from] SchemaError),

    #[error("serialization error: {0}")]
    Serialization(#[from] PersistError),
}
