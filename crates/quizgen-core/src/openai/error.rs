use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error(transparent)]
    Api(#[from] async_openai::error::OpenAIError),

    #[error("No response from the model endpoint")]
    EmptyResponse,

    #[error("Model refused to answer: {0}")]
    Refusal(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),

    #[error(transparent)]
    HttpClientBuild(#[from] reqwest::Error),
}
