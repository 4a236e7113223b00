pub mod error;
pub mod llm_config;
pub mod openai;
pub mod persist;
pub mod quiz;
pub mod theme;

pub use error::QuizError;
pub use llm_config::{ConfigError, LlmConfig, LlmService};
pub use openai::{CallConfig, Completion, GenerationRequest, OpenAiEndpoint, QuizEndpoint, error::TransportError};
pub use persist::{OutputFormat, PersistError, write_questions};
pub use quiz::{GeneratorConfig, QuizGenerator, normalize};
pub use theme::{BatchReport, Theme, ThemeError, load_themes, parse_themes, run_batch, sanitize_file_stem};
