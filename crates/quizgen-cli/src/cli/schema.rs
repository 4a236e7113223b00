use crate::opt::Schema;
use anyhow::{Context, Error};
use quizgen_schema::{Rules, quiz_schema};

pub(crate) async fn exec(opt: Schema) -> Result<(), Error> {
    let rules: Rules = opt.rules.into();
    let schema = serde_json::to_string_pretty(&quiz_schema(&rules))?;

    match opt.output {
        Some(path) => {
            tokio::fs::write(&path, schema)
                .await
                .with_context(|| format!("failed to write schema to {}", path.display()))?;
            println!("Generated schema in {}", path.display());
        }
        None => println!("{schema}"),
    }
    Ok(())
}
