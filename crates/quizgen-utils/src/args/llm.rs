use clap::Args;

#[derive(Clone, Args)]
pub struct LlmArgs {
    #[arg(
        long,
        env = "QUIZGEN_SERVICE",
        default_value = "openai",
        help = "LLM service: openai, ollama or the base url of an OpenAI compatible endpoint"
    )]
    pub service: String,

    #[arg(long, env = "QUIZGEN_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[arg(long, env = "OPENAI_API_KEY", hide = true, hide_env_values = true)]
    pub openai_api_key: Option<String>,

    #[arg(long, env = "QUIZGEN_MODEL", help = "Model name, defaults to the service default")]
    pub model: Option<String>,

    #[arg(long, env = "QUIZGEN_TEMPERATURE", default_value_t = 0.2)]
    pub temperature: f32,

    #[arg(
        long,
        env = "QUIZGEN_TIMEOUT_SECS",
        default_value_t = 120,
        help = "Total time budget for the model call"
    )]
    pub timeout_secs: u64,
}

impl LlmArgs {
    /// The explicit key wins over the generic `OPENAI_API_KEY`.
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .or(self.openai_api_key.as_deref())
            .filter(|key| !key.trim().is_empty())
    }
}

impl std::fmt::Debug for LlmArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmArgs")
            .field("service", &self.service)
            .field("api_key", &self.key().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
