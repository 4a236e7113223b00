use crate::cli::generate::generator;
use crate::opt::Batch;
use anyhow::{Error, anyhow};
use quizgen_core::{load_themes, run_batch};

pub(crate) async fn exec(opt: Batch) -> Result<(), Error> {
    let themes = load_themes(&opt.themes)?;
    tracing::info!(themes = themes.len(), path = %opt.themes.display(), "loaded themes");

    let generator = generator(opt.generation)?;
    let report = run_batch(&generator, &themes, &opt.output_dir).await?;

    for path in &report.written {
        println!("{}", path.display());
    }
    if !report.is_success() {
        for (name, error) in &report.failed {
            eprintln!("{name}: {error}");
        }
        return Err(anyhow!(
            "{} of {} themes failed",
            report.failed.len(),
            themes.len()
        ));
    }
    Ok(())
}
