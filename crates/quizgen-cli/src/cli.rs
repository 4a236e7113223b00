mod batch;
mod generate;
pub(crate) mod opt;
mod schema;
mod validate;

use crate::opt::Commands;
use anyhow::Error;

pub(crate) async fn exec(command: Commands) -> Result<(), Error> {
    match command {
        Commands::Generate(o) => generate::exec(o).await,
        Commands::Batch(o) => batch::exec(o).await,
        Commands::Validate(o) => validate::exec(o).await,
        Commands::Schema(o) => schema::exec(o).await,
    }
}
