//! Helpdeck CLI — manage and resolve contextual help articles.
//!
//! Thin command surface over the help content service: search, CRUD,
//! import/export, and the "open help" resolution pipeline.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
