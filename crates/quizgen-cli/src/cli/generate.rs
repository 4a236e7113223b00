use crate::opt::{GenerationArgs, Generate};
use anyhow::{Context, Error, bail};
use quizgen_core::{LlmConfig, OpenAiEndpoint, QuizError, QuizGenerator};

/// Configure step: fails before any network call when the credentials are incomplete.
pub(super) fn generator(args: GenerationArgs) -> Result<QuizGenerator<OpenAiEndpoint>, QuizError> {
    let (config, llm) = args.into_parts();
    let llm_config = LlmConfig::try_from(llm)?;
    tracing::debug!(?llm_config, ?config, "configured generator");
    QuizGenerator::from_config(&llm_config, config)
}

pub(crate) async fn exec(opt: Generate) -> Result<(), Error> {
    let instruction = match (opt.instruction, opt.instruction_file) {
        (Some(instruction), _) => instruction,
        (None, Some(path)) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read instruction from {}", path.display()))?,
        (None, None) => bail!("either --instruction or --instruction-file is required"),
    };
    if instruction.trim().is_empty() {
        bail!("instruction is empty");
    }

    let generator = generator(opt.generation)?;
    generator.run(instruction.trim(), &opt.output).await?;

    println!("{}", opt.output.display());
    Ok(())
}
