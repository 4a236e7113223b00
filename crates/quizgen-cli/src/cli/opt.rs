use clap::{ArgGroup, Args, Parser, Subcommand};
use quizgen_core::{GeneratorConfig, OutputFormat};
use quizgen_schema::Rules;
use quizgen_utils::args::llm::LlmArgs;
use std::path::PathBuf;

const STRICT_QUIZ_QUESTIONS: usize = 10;

#[derive(Debug, Parser)]
#[command(name = "quizgen", about = "Generate schema-checked quizzes with a language model", version)]
pub(crate) struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Generate one quiz from an instruction
    Generate(Generate),

    /// Generate one quiz per entry of a themes file
    Batch(Batch),

    /// Validate a saved model response and write its question array
    Validate(Validate),

    /// Print the output-constraint schema sent to the model
    Schema(Schema),
}

#[derive(Debug, Args)]
pub(crate) struct RuleArgs {
    /// At least 10 distinct questions of both kinds, four options with one correct answer,
    /// 1 to 60 seconds wait time
    #[arg(long)]
    pub(crate) strict_quiz: bool,

    #[arg(long)]
    pub(crate) min_questions: Option<usize>,

    /// Smallest accepted WaitTimeInSec, 0 allows questions without wait time
    #[arg(long)]
    pub(crate) min_wait: Option<u32>,

    #[arg(long)]
    pub(crate) max_wait: Option<u32>,
}

impl From<RuleArgs> for Rules {
    fn from(args: RuleArgs) -> Self {
        let mut rules = if args.strict_quiz {
            Rules::strict_quiz(args.min_questions.unwrap_or(STRICT_QUIZ_QUESTIONS))
        } else {
            Rules::default()
        };

        if args.min_questions.is_some() {
            rules.min_questions = args.min_questions;
        }
        if let Some(min_wait) = args.min_wait {
            rules.min_wait_secs = min_wait;
        }
        if args.max_wait.is_some() {
            rules.max_wait_secs = args.max_wait;
        }
        rules
    }
}

#[derive(Debug, Args)]
pub(crate) struct GenerationArgs {
    /// Total number of model requests; failed attempts are retried with a repair prompt
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub(crate) attempts: u32,

    /// Send the schema without strict mode, for endpoints that reject it
    #[arg(long)]
    pub(crate) no_strict_schema: bool,

    /// Indent the written JSON
    #[arg(long)]
    pub(crate) pretty: bool,

    #[command(flatten)]
    pub(crate) rules: RuleArgs,

    #[command(flatten)]
    pub(crate) llm: LlmArgs,
}

impl GenerationArgs {
    pub(crate) fn into_parts(self) -> (GeneratorConfig, LlmArgs) {
        let config = GeneratorConfig::builder()
            .rules(self.rules.into())
            .attempts(self.attempts)
            .strict_schema(!self.no_strict_schema)
            .format(output_format(self.pretty))
            .build();
        (config, self.llm)
    }
}

pub(crate) fn output_format(pretty: bool) -> OutputFormat {
    if pretty { OutputFormat::Pretty } else { OutputFormat::Compact }
}

#[derive(Debug, Parser)]
#[command(group(ArgGroup::new("source").required(true).args(["instruction", "instruction_file"])))]
pub(crate) struct Generate {
    /// What the quiz is about, including language and style
    #[arg(long)]
    pub(crate) instruction: Option<String>,

    #[arg(long)]
    pub(crate) instruction_file: Option<PathBuf>,

    #[arg(short, long, default_value = "quiz.json")]
    pub(crate) output: PathBuf,

    #[command(flatten)]
    pub(crate) generation: GenerationArgs,
}

#[derive(Debug, Parser)]
pub(crate) struct Batch {
    /// JSON file with a "thema" list of {"name", "instruction"} entries
    #[arg(default_value = "thema.json")]
    pub(crate) themes: PathBuf,

    #[arg(long, default_value = "quiz")]
    pub(crate) output_dir: PathBuf,

    #[command(flatten)]
    pub(crate) generation: GenerationArgs,
}

#[derive(Debug, Parser)]
pub(crate) struct Validate {
    /// Raw model response, the object with the "Questions" wrapper
    #[arg(required = true)]
    pub(crate) input: PathBuf,

    #[arg(short, long, default_value = "quiz.json")]
    pub(crate) output: PathBuf,

    #[arg(long)]
    pub(crate) pretty: bool,

    #[command(flatten)]
    pub(crate) rules: RuleArgs,
}

#[derive(Debug, Parser)]
pub(crate) struct Schema {
    /// Write the schema here instead of stdout
    #[arg(short, long)]
    pub(crate) output: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) rules: RuleArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn rules(args: &[&str]) -> Rules {
        let mut argv = vec!["quizgen", "schema"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        let Commands::Schema(schema) = cli.command else {
            panic!("expected schema command");
        };
        schema.rules.into()
    }

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_rules() {
        assert_eq!(rules(&[]), Rules::default());
    }

    #[test]
    fn test_strict_quiz_rules() {
        assert_eq!(rules(&["--strict-quiz"]), Rules::strict_quiz(10));
        assert_eq!(
            rules(&["--strict-quiz", "--min-questions", "5"]),
            Rules::strict_quiz(5)
        );
    }

    #[test]
    fn test_wait_overrides() {
        let rules = rules(&["--min-wait", "0", "--max-wait", "30"]);
        assert_eq!(rules.min_wait_secs, 0);
        assert_eq!(rules.max_wait_secs, Some(30));
        assert_eq!(rules.min_questions, None);
    }

    #[test]
    fn test_generate_requires_instruction() {
        assert!(Cli::try_parse_from(["quizgen", "generate", "--service", "ollama"]).is_err());
        assert!(
            Cli::try_parse_from([
                "quizgen",
                "generate",
                "--instruction",
                "x",
                "--instruction-file",
                "y"
            ])
            .is_err()
        );
    }

    #[test]
    fn test_generate_options() {
        let cli = Cli::try_parse_from([
            "quizgen",
            "-v",
            "generate",
            "--instruction",
            "Planets",
            "--attempts",
            "4",
            "--no-strict-schema",
            "--pretty",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Generate(generate) = cli.command else {
            panic!("expected generate command");
        };
        assert_eq!(generate.output, PathBuf::from("quiz.json"));
        let (config, _) = generate.generation.into_parts();
        assert_eq!(config.attempts, 4);
        assert!(!config.strict_schema);
        assert_eq!(config.format, OutputFormat::Pretty);
    }

    #[test]
    fn test_zero_attempts_rejected() {
        assert!(Cli::try_parse_from(["quizgen", "generate", "--instruction", "x", "--attempts", "0"]).is_err());
    }
}
