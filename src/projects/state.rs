// Per-project state.json

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::layout::relative_output_path;
use crate::errors::Result;
use crate::ideas::Idea;
use crate::storage;

/// Reference back to the idea a project was started from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceIdea {
    pub id: u64,
    pub title: String,
}

/// One dated iteration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IterationEntry {
    pub date: NaiveDate,
    /// Relative to the project folder
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProjectState {
    pub project_slug: String,
    pub created_date: NaiveDate,
    pub source_idea: SourceIdea,
    /// Append-only, one entry per date
    #[serde(default)]
    pub iterations: Vec<IterationEntry>,
}

impl ProjectState {
    /// Fresh state for a project started from `idea`
    pub fn seed(idea: &Idea, created_date: NaiveDate) -> Self {
        Self {
            project_slug: idea.project_slug.clone(),
            created_date,
            source_idea: SourceIdea {
                id: idea.id,
                title: idea.title.clone(),
            },
            iterations: Vec::new(),
        }
    }

    /// `Ok(None)` when the file does not exist
    pub fn load(path: &Path) -> Result<Option<Self>> {
        storage::read_json(path)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        storage::write_json_atomic(path, self, "project state")
    }

    /// 1-based position of the entry for `date`
    pub fn iteration_number(&self, date: NaiveDate) -> Option<usize> {
        self.iterations
            .iter()
            .position(|e| e.date == date)
            .map(|idx| idx + 1)
    }

    /// Append an entry for `date` unless one exists. Returns true if appended.
    pub fn record_iteration(&mut self, date: NaiveDate) -> bool {
        let output_path = relative_output_path(date);
        if let Some(entry) = self.iterations.iter_mut().find(|e| e.date == date) {
            entry.output_path = output_path;
            return false;
        }
        self.iterations.push(IterationEntry { date, output_path });
        true
    }
}
