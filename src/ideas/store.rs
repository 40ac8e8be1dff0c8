// Idea store — a JSON array persisted at <root>/ideas.json

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use super::filter::{find_blacklisted, normalize};
use super::slug::{slugify, unique_slug};
use crate::errors::{Error, Result};
use crate::storage;

/// A single stored idea. Never modified after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Idea {
    /// Sequential identifier, starting at 1
    pub id: u64,

    /// Idea text as supplied (trimmed)
    pub title: String,

    /// Unique slug, also the project folder name
    pub project_slug: String,

    pub created_date: NaiveDate,
}

/// Rules applied when admitting a new idea
#[derive(Debug, Clone)]
pub struct AdmissionRules<'a> {
    pub max_slug_len: usize,
    /// `None` disables the keyword check
    pub blacklist: Option<&'a [String]>,
}

/// Loaded idea list plus the path it came from
#[derive(Debug)]
pub struct IdeaStore {
    path: PathBuf,
    ideas: Vec<Idea>,
}

impl IdeaStore {
    /// Load from disk. A missing file is an empty store; an unparsable one is an error.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let ideas = storage::read_json::<Vec<Idea>>(&path)?.unwrap_or_default();
        Ok(Self { path, ideas })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All ideas in insertion order
    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn find_by_slug(&self, slug: &str) -> Option<&Idea> {
        self.ideas.iter().find(|i| i.project_slug == slug)
    }

    /// Existing idea whose normalized title equals `text`'s
    pub fn find_duplicate(&self, text: &str) -> Option<&Idea> {
        let wanted = normalize(text);
        self.ideas.iter().find(|i| normalize(&i.title) == wanted)
    }

    /// Validate `text`, derive a unique slug and append the new idea in memory.
    ///
    /// Call [`IdeaStore::save`] to persist.
    pub fn insert(
        &mut self,
        text: &str,
        created_date: NaiveDate,
        rules: &AdmissionRules<'_>,
    ) -> Result<&Idea> {
        let title = text.trim();
        if title.is_empty() {
            return Err(Error::InvalidIdea {
                reason: "idea text is empty".to_string(),
            });
        }

        if let Some(keyword) = rules.blacklist.and_then(|list| find_blacklisted(title, list)) {
            return Err(Error::Rejected {
                keyword: keyword.to_string(),
            });
        }

        if let Some(existing) = self.find_duplicate(title) {
            return Err(Error::Duplicate {
                existing_slug: existing.project_slug.clone(),
            });
        }

        let base = slugify(title, rules.max_slug_len);
        if base.is_empty() {
            return Err(Error::InvalidIdea {
                reason: format!("'{}' contains no letters or digits", title),
            });
        }
        let project_slug = unique_slug(&base, rules.max_slug_len, |s| {
            self.find_by_slug(s).is_some()
        });

        let idea = Idea {
            id: self.next_id()?,
            title: title.to_string(),
            project_slug,
            created_date,
        };
        info!(id = idea.id, slug = %idea.project_slug, "added idea");
        let idx = self.ideas.len();
        self.ideas.push(idea);

        Ok(&self.ideas[idx])
    }

    /// Persist the whole list atomically
    pub fn save(&self) -> Result<()> {
        storage::write_json_atomic(&self.path, &self.ideas, "idea store")
    }

    fn next_id(&self) -> Result<u64> {
        let max = self.ideas.iter().map(|i| i.id).max().unwrap_or(0);
        max.checked_add(1).ok_or_else(|| Error::InvalidIdea {
            reason: format!("no idea id left after {}", max),
        })
    }
}
