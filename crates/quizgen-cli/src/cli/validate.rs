use crate::opt::{Validate, output_format};
use anyhow::{Context, Error};
use quizgen_core::{QuizError, normalize, write_questions};
use quizgen_schema::Rules;

/// Offline Validate, Normalize and Persist of a saved model response.
pub(crate) async fn exec(opt: Validate) -> Result<(), Error> {
    let raw = tokio::fs::read_to_string(&opt.input)
        .await
        .with_context(|| format!("failed to read {}", opt.input.display()))?;
    let rules: Rules = opt.rules.into();

    let questions = normalize(&raw, &rules)?;
    write_questions(&opt.output, &questions, output_format(opt.pretty)).map_err(QuizError::from)?;

    println!(
        "{} questions of {} are ok, written to {}",
        questions.len(),
        opt.input.display(),
        opt.output.display()
    );
    Ok(())
}
