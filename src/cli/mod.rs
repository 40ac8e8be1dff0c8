// CLI module
// Argument parsing and subcommand dispatch for the idealoop binary

mod args;
mod commands;

pub use args::{Cli, Command};
pub use commands::handle_command;
