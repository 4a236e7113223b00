use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_openai::config::OpenAIConfig;
use quizgen_utils::args::llm::LlmArgs;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("no API key configured for service {service}; set QUIZGEN_API_KEY or OPENAI_API_KEY")]
    MissingApiKey { service: String },

    #[error("unknown llm service '{0}', expected openai, ollama or a base url")]
    UnknownService(String),

    #[error("temperature must be between 0 and 2, got {0}")]
    InvalidTemperature(f32),

    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LlmService {
    #[default]
    OpenAI,
    Ollama,
    Custom(Url),
}

impl FromStr for LlmService {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmService::OpenAI),
            "ollama" => Ok(LlmService::Ollama),
            _ => Url::parse(s.trim())
                .ok()
                .filter(|url| matches!(url.scheme(), "http" | "https"))
                .map(LlmService::Custom)
                .ok_or_else(|| ConfigError::UnknownService(s.to_string())),
        }
    }
}

impl fmt::Display for LlmService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmService::OpenAI => f.write_str("openai"),
            LlmService::Ollama => f.write_str("ollama"),
            LlmService::Custom(url) => write!(f, "{url}"),
        }
    }
}

impl LlmService {
    #[must_use]
    pub fn get_base(&self) -> Cow<'_, str> {
        match self {
            LlmService::OpenAI => "https://api.openai.com/v1".into(),
            LlmService::Ollama => "http://localhost:11434/v1".into(),
            LlmService::Custom(url) => Cow::from(url.as_str().trim_end_matches('/')),
        }
    }

    #[must_use]
    pub fn default_model(&self) -> &'static str {
        match self {
            LlmService::OpenAI | LlmService::Custom(_) => "gpt-4.1-mini",
            LlmService::Ollama => "gpt-oss:20b",
        }
    }

    /// Local and self-hosted endpoints usually run without credentials.
    #[must_use]
    pub fn requires_key(&self) -> bool {
        matches!(self, LlmService::OpenAI)
    }
}

#[derive(Clone)]
pub struct LlmConfig {
    service: LlmService,
    key: Option<String>,
    model: String,
    temperature: Option<f32>,
    timeout: Duration,
}

impl TryFrom<LlmArgs> for LlmConfig {
    type Error = ConfigError;

    fn try_from(args: LlmArgs) -> Result<Self, Self::Error> {
        let service = LlmService::from_str(&args.service)?;
        let key = args.key().map(str::to_owned);

        if service.requires_key() && key.is_none() {
            return Err(ConfigError::MissingApiKey {
                service: service.to_string(),
            });
        }
        if !(0.0..=2.0).contains(&args.temperature) {
            return Err(ConfigError::InvalidTemperature(args.temperature));
        }
        if args.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout);
        }

        let model = args
            .model
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::debug!(%service, "using default model of service");
                service.default_model().to_owned()
            });

        Ok(Self {
            service,
            key,
            model,
            temperature: Some(args.temperature),
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("service", &self.service)
            .field("key", &self.key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl LlmConfig {
    #[must_use]
    pub fn service(&self) -> &LlmService {
        &self.service
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    #[must_use]
    pub fn get_openai_config(&self) -> OpenAIConfig {
        let mut openai_config = OpenAIConfig::default().with_api_base(self.service.get_base());

        if let Some(api_key) = &self.key {
            openai_config = openai_config.with_api_key(api_key);
        }
        openai_config
    }
}
