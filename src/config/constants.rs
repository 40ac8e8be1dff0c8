// Project-wide constants
//
// Centralised here so file names and limits have one source of truth.
// Import via `use crate::config::constants::*;`.

/// Idea store file name, relative to the data root.
pub const DEFAULT_IDEAS_FILE: &str = "ideas.json";

/// Directory holding one folder per project slug, relative to the data root.
pub const DEFAULT_PROJECTS_DIR: &str = "projects";

/// Per-project metadata file.
pub const STATE_FILE: &str = "state.json";

/// Artifact written inside each iteration folder.
pub const OUTPUT_FILE: &str = "output.md";

/// Iteration folders are named `iteration_<YYYY-MM-DD>`.
pub const ITERATION_PREFIX: &str = "iteration_";

/// Date format used in folder names and JSON documents.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default slug length cap.
pub const DEFAULT_MAX_SLUG_LEN: usize = 60;

/// Smallest `max_slug_len` accepted from configuration.
pub const MIN_SLUG_LEN: usize = 8;

/// Config file looked up inside the data root.
pub const ROOT_CONFIG_FILE: &str = "idealoop.toml";

/// Environment variable overriding the data root.
pub const ROOT_ENV_VAR: &str = "IDEALOOP_ROOT";

/// Keywords for overused idea categories.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    "fitness",
    "habit tracker",
    "to-do",
    "todo",
    "journal",
    "recipe",
    "quote",
    "chatbot",
    "weather",
    "blog",
    "reminder",
];
