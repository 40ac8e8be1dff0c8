// Library error type
//
// Every store and project operation returns one of these. The binary wraps
// them in anyhow for the context chain printed to the user.

use std::path::{Path, PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A JSON file exists but does not parse into the expected shape
    #[error("Corrupt store at {path}: {source}")]
    CorruptStore {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A path could not be read, created or written
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid slug '{slug}': {reason}")]
    InvalidSlug { slug: String, reason: String },

    #[error("Invalid idea: {reason}")]
    InvalidIdea { reason: String },

    #[error("No idea or project found for slug '{slug}'")]
    UnknownProject { slug: String },

    #[error("Idea already exists as '{existing_slug}'")]
    Duplicate { existing_slug: String },

    #[error("Idea rejected: contains blacklisted keyword '{keyword}'")]
    Rejected { keyword: String },

    #[error("Failed to serialize {what}: {source}")]
    Serialize {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn corrupt(path: &Path, source: serde_json::Error) -> Self {
        Error::CorruptStore {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_slug(slug: &str, reason: impl Into<String>) -> Self {
        Error::InvalidSlug {
            slug: slug.to_string(),
            reason: reason.into(),
        }
    }
}
