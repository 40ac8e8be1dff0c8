// Idealoop
// Main entry point

use anyhow::Result;
use clap::Parser;

use idealoop::cli::{handle_command, Cli};
use idealoop::config::load_config;
use idealoop::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);

    let config = load_config(cli.root, cli.config.as_deref())?;
    tracing::debug!(root = %config.root.display(), "configuration loaded");

    let output = handle_command(cli.command, &config)?;
    println!("{}", output);

    Ok(())
}
