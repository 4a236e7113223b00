mod cli;

use anyhow::Result;
use clap::Parser;
use cli::opt;
use quizgen_utils::tracing::TracingConfig;
use tracing::level_filters::LevelFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Loaded before parsing so clap sees the variables of a `.env` file
    let dotenv = dotenvy::dotenv();
    let opt = opt::Cli::parse();

    quizgen_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .default_level(if opt.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
            .build(),
    )?;

    match dotenv {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Err(error) if error.not_found() => {}
        Err(error) => tracing::warn!(error = &error as &dyn std::error::Error, "failed to load environment file"),
    }

    cli::exec(opt.command).await
}
