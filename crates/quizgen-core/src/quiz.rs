use std::error::Error;
use std::path::Path;

use quizgen_schema::{Question, Rules, construct, quiz_schema};
use tracing::instrument;
use typed_builder::TypedBuilder;

use crate::error::QuizError;
use crate::llm_config::LlmConfig;
use crate::openai::error::TransportError;
use crate::openai::{CallConfig, GenerationRequest, OpenAiEndpoint, QuizEndpoint};
use crate::persist::{OutputFormat, write_questions};

mod prompt;

#[derive(TypedBuilder, Debug, Clone)]
pub struct GeneratorConfig {
    #[builder(default)]
    pub rules: Rules,
    /// Total number of requests per run. `1` means no retry.
    #[builder(default = 1)]
    pub attempts: u32,
    #[builder(default = true)]
    pub strict_schema: bool,
    #[builder(default)]
    pub call: CallConfig,
    #[builder(default)]
    pub format: OutputFormat,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig::builder().build()
    }
}

/// A failed attempt, with the raw response if the endpoint produced one.
struct Rejected {
    raw: Option<String>,
    error: QuizError,
}

/// Drives one generation run: request, validate, strip the wrapper, persist.
pub struct QuizGenerator<E> {
    endpoint: E,
    config: GeneratorConfig,
}

impl QuizGenerator<OpenAiEndpoint> {
    /// Builds a generator talking to the configured OpenAI compatible service.
    ///
    /// The timeout of `llm_config` replaces the total timeout of `config.call`.
    pub fn from_config(llm_config: &LlmConfig, mut config: GeneratorConfig) -> Result<Self, QuizError> {
        config.call.total_timeout = llm_config.timeout();
        let endpoint = OpenAiEndpoint::new(llm_config, &config.call)?;
        Ok(Self::new(endpoint, config))
    }
}

impl<E: QuizEndpoint> QuizGenerator<E> {
    pub fn new(endpoint: E, config: GeneratorConfig) -> Self {
        Self { endpoint, config }
    }

    pub fn endpoint(&self) -> &E {
        &self.endpoint
    }

    /// Requests a quiz and returns its validated questions without the wrapper object.
    #[instrument(skip_all, fields(attempts = self.config.attempts))]
    pub async fn generate(&self, instruction: &str) -> Result<Vec<Question>, QuizError> {
        let system = prompt::system_prompt(&self.config.rules);
        let schema = quiz_schema(&self.config.rules);
        let attempts = self.config.attempts.max(1);

        let mut user = instruction.to_owned();
        let mut attempt = 1;
        loop {
            let request = GenerationRequest {
                system: system.clone(),
                user,
                schema: schema.clone(),
                strict: self.config.strict_schema,
            };

            let rejected = match self.attempt(&request).await {
                Ok(questions) => return Ok(questions),
                Err(rejected) => rejected,
            };
            if attempt >= attempts {
                return Err(rejected.error);
            }

            tracing::warn!(
                attempt,
                attempts,
                error = &rejected.error as &dyn Error,
                "generation attempt failed, retrying"
            );
            user = match &rejected.raw {
                Some(raw) => prompt::repair_prompt(instruction, raw, &rejected.error),
                None => prompt::retry_prompt(instruction, &rejected.error),
            };
            attempt += 1;
        }
    }

    async fn attempt(&self, request: &GenerationRequest) -> Result<Vec<Question>, Rejected> {
        let timeout = self.config.call.total_timeout;
        let completion = match tokio::time::timeout(timeout, self.endpoint.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(TransportError::Timeout(timeout)),
        }
        .map_err(|error| Rejected {
            raw: None,
            error: error.into(),
        })?;

        tracing::debug!(tokens = completion.tokens, "received completion");

        normalize(&completion.content, &self.config.rules).map_err(|error| Rejected {
            raw: Some(completion.content),
            error,
        })
    }

    /// Generates a quiz and writes the bare question array to `output`.
    ///
    /// Nothing is written unless the whole response validated.
    #[instrument(skip(self, instruction), fields(output = %output.display()))]
    pub async fn run(&self, instruction: &str, output: &Path) -> Result<usize, QuizError> {
        let questions = self.generate(instruction).await?;
        write_questions(output, &questions, self.config.format)?;
        tracing::info!(questions = questions.len(), "quiz written");
        Ok(questions.len())
    }
}

/// Validates a raw response and strips the `Questions` wrapper.
pub fn normalize(raw: &str, rules: &Rules) -> Result<Vec<Question>, QuizError> {
    Ok(construct(raw, rules)?.into_questions())
}
