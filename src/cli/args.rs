// Command-line arguments

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "idealoop",
    version,
    about = "Track product ideas and scaffold dated project iterations"
)]
pub struct Cli {
    /// Data root holding ideas.json and projects/ (default: $IDEALOOP_ROOT or cwd)
    #[arg(long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Configuration file (default: <root>/idealoop.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new idea and print its slug
    Idea {
        /// Idea text (multiple words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,

        /// Accept the idea even if it contains a blacklisted keyword
        #[arg(long)]
        force: bool,

        /// Creation date (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// List recorded ideas
    Ideas {
        /// Print the raw JSON array
        #[arg(long)]
        json: bool,
    },

    /// Write the iteration for a project on a date
    Iterate {
        /// Project slug (from `idealoop idea`)
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        slug: Option<String>,

        /// Iterate every existing project
        #[arg(long)]
        all: bool,

        /// Iteration date (default: today)
        #[arg(long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,

        /// Text for the Notes section of output.md
        #[arg(long, value_name = "TEXT")]
        notes: Option<String>,
    },

    /// Show a project's iterations and check them against the folders on disk
    Status {
        slug: String,
    },
}
