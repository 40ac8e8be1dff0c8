// Idea generator
//
// Turns free text into a stored idea with a unique slug. The store is read,
// extended in memory and written back in one go; on any error the file on
// disk is left as it was.

pub mod filter;
pub mod slug;
mod store;

pub use slug::{slugify, unique_slug, validate_slug};
pub use store::{AdmissionRules, Idea, IdeaStore};

use chrono::NaiveDate;

use crate::config::Config;
use crate::errors::Result;

/// Options for [`add_idea`]
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    /// Skip the blacklist check
    pub force: bool,
}

/// Append a new idea to the configured store and return it.
pub fn add_idea(
    config: &Config,
    text: &str,
    created_date: NaiveDate,
    options: &AddOptions,
) -> Result<Idea> {
    let mut store = IdeaStore::load(config.ideas_path())?;
    let rules = AdmissionRules {
        max_slug_len: config.max_slug_len,
        blacklist: (!options.force).then_some(config.blacklist.as_slice()),
    };

    let idea = store.insert(text, created_date, &rules)?.clone();
    store.save()?;
    Ok(idea)
}

/// All stored ideas, oldest first.
pub fn list_ideas(config: &Config) -> Result<Vec<Idea>> {
    Ok(IdeaStore::load(config.ideas_path())?.ideas().to_vec())
}
