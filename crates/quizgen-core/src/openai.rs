use crate::llm_config::LlmConfig;
use crate::openai::error::TransportError;
use async_openai::Client;
use async_openai::config::OpenAIConfig;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
    CreateChatCompletionRequestArgs, CreateChatCompletionResponse, ResponseFormat, ResponseFormatJsonSchema,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use quizgen_schema::{SCHEMA_DESCRIPTION, SCHEMA_NAME};
use serde_json::Value;
use std::error::Error;
use std::time::Duration;
use tracing::instrument;
use typed_builder::TypedBuilder;

pub mod error;

#[derive(TypedBuilder, Debug, Clone)]
pub struct CallConfig {
    /// Budget for the whole call including rate-limit retries.
    pub total_timeout: Duration,
    #[builder(default = Duration::from_secs(90))]
    pub iteration_timeout: Duration,
    #[builder(default = Duration::from_millis(100))]
    pub min_retry_interval: Duration,
    #[builder(default = Duration::from_secs(2))]
    pub max_retry_interval: Duration,
}

impl Default for CallConfig {
    fn default() -> Self {
        CallConfig::builder().total_timeout(Duration::from_secs(120)).build()
    }
}

/// One structured-output request: instructions plus the output-constraint schema.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub schema: Value,
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub content: String,
    pub tokens: Option<u32>,
}

impl Completion {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            tokens: None,
        }
    }
}

impl TryFrom<CreateChatCompletionResponse> for Completion {
    type Error = TransportError;

    fn try_from(value: CreateChatCompletionResponse) -> Result<Completion, Self::Error> {
        let tokens = value.usage.map(|u| u.total_tokens);

        let first = value.choices.into_iter().next().ok_or(TransportError::EmptyResponse)?;

        if let Some(refusal) = first.message.refusal {
            return Err(TransportError::Refusal(refusal));
        }

        let content = first
            .message
            .content
            .filter(|content| !content.trim().is_empty())
            .ok_or(TransportError::EmptyResponse)?;

        Ok(Completion { content, tokens })
    }
}

/// A generation endpoint that honours a JSON-schema output constraint.
#[async_trait]
pub trait QuizEndpoint: Send + Sync {
    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, TransportError>;
}

/// OpenAI compatible chat completions endpoint in structured-output mode.
#[derive(Clone)]
pub struct OpenAiEndpoint {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: Option<f32>,
}

impl OpenAiEndpoint {
    pub fn new(llm_config: &LlmConfig, config: &CallConfig) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.iteration_timeout)
            .build()
            .map_err(|error| {
                tracing::error!(error = &error as &dyn Error, "failed to build http client for openai");
                TransportError::HttpClientBuild(error)
            })?;

        let mut backoff_builder = ExponentialBackoffBuilder::default();
        backoff_builder
            .with_max_interval(config.max_retry_interval)
            .with_initial_interval(config.min_retry_interval)
            .with_max_elapsed_time(Some(config.total_timeout));

        let client = Client::with_config(llm_config.get_openai_config())
            .with_http_client(http_client)
            .with_backoff(backoff_builder.build());

        Ok(Self {
            client,
            model: llm_config.model().to_owned(),
            temperature: llm_config.temperature(),
        })
    }

    fn messages(request: &GenerationRequest) -> Result<Vec<ChatCompletionRequestMessage>, TransportError> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(request.system.as_str())
                .build()?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(request.user.as_str())
                .build()?
                .into(),
        ])
    }
}

#[async_trait]
impl QuizEndpoint for OpenAiEndpoint {
    #[instrument(skip_all, fields(model = %self.model))]
    async fn complete(&self, request: &GenerationRequest) -> Result<Completion, TransportError> {
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(&self.model)
            .messages(Self::messages(request)?)
            .top_p(1.0)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    description: Some(SCHEMA_DESCRIPTION.to_owned()),
                    name: SCHEMA_NAME.to_owned(),
                    schema: Some(request.schema.clone()),
                    strict: Some(request.strict),
                },
            });

        if let Some(temperature) = self.temperature {
            args.temperature(temperature);
        }

        let chat_request = args.build()?;

        tracing::debug!("sending openai request");
        let chat_completion = self.client.chat().create(chat_request).await.map_err(|error| {
            tracing::warn!(error = &error as &dyn Error, "open AI call failed");
            TransportError::Api(error)
        })?;

        chat_completion.try_into()
    }
}
