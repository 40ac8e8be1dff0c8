// Project iterator
//
// Ensures a project folder exists for a slug, then writes one dated
// iteration. Re-running for a date rewrites output.md and keeps the single
// state entry for that date.

use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::layout::{parse_iteration_folder, ProjectLayout};
use super::output::render_output;
use super::state::ProjectState;
use crate::config::Config;
use crate::errors::{Error, Result};
use crate::ideas::{validate_slug, IdeaStore};
use crate::storage;

/// Result of one successful iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationOutcome {
    pub slug: String,
    pub date: NaiveDate,
    /// 1-based position in the project's iterations list
    pub number: usize,
    pub output_path: PathBuf,
    /// The project folder and state.json were created by this call
    pub created_project: bool,
    /// A new entry was appended (false when the date was re-run)
    pub new_entry: bool,
}

/// A project left out of a batch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProject {
    pub slug: String,
    pub reason: String,
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub written: Vec<IterationOutcome>,
    pub skipped: Vec<SkippedProject>,
}

/// Mismatch between state.json and the folders on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Discrepancy {
    /// Listed in state.json but the folder is gone
    MissingFolder(NaiveDate),
    /// Folder present, output.md absent
    MissingOutput(NaiveDate),
    /// Folder on disk with no state entry
    UntrackedFolder(NaiveDate),
    /// Date listed more than once
    DuplicateEntry(NaiveDate),
}

impl fmt::Display for Discrepancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discrepancy::MissingFolder(d) => write!(f, "{}: listed in state.json, folder missing", d),
            Discrepancy::MissingOutput(d) => write!(f, "{}: folder present, output.md missing", d),
            Discrepancy::UntrackedFolder(d) => write!(f, "{}: folder not listed in state.json", d),
            Discrepancy::DuplicateEntry(d) => write!(f, "{}: listed more than once", d),
        }
    }
}

/// Folders made by one iteration, removed again on drop unless kept.
///
/// Only the outermost new folder is tracked: the project folder when it did
/// not exist, otherwise the iteration folder when it did not exist.
struct CreatedDirs {
    root: Option<PathBuf>,
}

impl CreatedDirs {
    fn create(project_dir: &Path, iteration_dir: &Path) -> Result<Self> {
        let root = if !project_dir.exists() {
            Some(project_dir.to_path_buf())
        } else if !iteration_dir.exists() {
            Some(iteration_dir.to_path_buf())
        } else {
            None
        };
        let guard = Self { root };
        fs::create_dir_all(iteration_dir).map_err(|e| Error::io(iteration_dir, e))?;
        Ok(guard)
    }

    fn keep(mut self) {
        self.root = None;
    }
}

impl Drop for CreatedDirs {
    fn drop(&mut self) {
        if let Some(root) = self.root.take() {
            debug!(path = %root.display(), "removing folder from failed iteration");
            let _ = fs::remove_dir_all(&root);
        }
    }
}

pub struct ProjectIterator<'a> {
    config: &'a Config,
    layout: ProjectLayout,
    today: NaiveDate,
}

impl<'a> ProjectIterator<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            layout: ProjectLayout::new(config.projects_path()),
            today: Local::now().date_naive(),
        }
    }

    /// Override the date stamped as `created_date` on new projects
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn layout(&self) -> &ProjectLayout {
        &self.layout
    }

    /// State for `slug`, or `None` when the project has not been started
    pub fn load_state(&self, slug: &str) -> Result<Option<ProjectState>> {
        validate_slug(slug)?;
        ProjectState::load(&self.layout.state_path(slug))
    }

    /// Write the iteration for `slug` on `date`, creating the project from its
    /// idea on first use.
    pub fn iterate(
        &self,
        slug: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<IterationOutcome> {
        validate_slug(slug)?;

        let (state, created_project) = match ProjectState::load(&self.layout.state_path(slug))? {
            Some(state) => (state, false),
            None => {
                let ideas = IdeaStore::load(self.config.ideas_path())?;
                let idea = ideas.find_by_slug(slug).ok_or_else(|| Error::UnknownProject {
                    slug: slug.to_string(),
                })?;
                (ProjectState::seed(idea, self.today), true)
            }
        };

        self.write_iteration(slug, state, created_project, date, notes)
    }

    /// Iterate every started project on `date`.
    ///
    /// Folders whose state.json is missing or corrupt are skipped; write
    /// failures abort the batch.
    pub fn iterate_all(&self, date: NaiveDate, notes: Option<&str>) -> Result<BatchSummary> {
        let mut summary = BatchSummary::default();

        for slug in self.project_slugs()? {
            let skip = |reason: String| {
                warn!(slug = %slug, %reason, "skipping project");
                SkippedProject {
                    slug: slug.clone(),
                    reason,
                }
            };

            if let Err(e) = validate_slug(&slug) {
                summary.skipped.push(skip(e.to_string()));
                continue;
            }

            let state = match ProjectState::load(&self.layout.state_path(&slug)) {
                Ok(Some(state)) => state,
                Ok(None) => {
                    summary.skipped.push(skip("missing state.json".to_string()));
                    continue;
                }
                Err(e @ Error::CorruptStore { .. }) => {
                    summary.skipped.push(skip(e.to_string()));
                    continue;
                }
                Err(e) => return Err(e),
            };

            let outcome = self.write_iteration(&slug, state, false, date, notes)?;
            summary.written.push(outcome);
        }

        Ok(summary)
    }

    /// Compare state.json against the iteration folders of `slug`.
    pub fn check(&self, slug: &str) -> Result<Vec<Discrepancy>> {
        let state = self.load_state(slug)?.ok_or_else(|| Error::UnknownProject {
            slug: slug.to_string(),
        })?;

        let project_dir = self.layout.project_dir(slug);
        let mut on_disk = BTreeSet::new();
        let entries = fs::read_dir(&project_dir).map_err(|e| Error::io(&project_dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(&project_dir, e))?;
            if !entry.path().is_dir() {
                continue;
            }
            if let Some(date) = entry.file_name().to_str().and_then(parse_iteration_folder) {
                on_disk.insert(date);
            }
        }

        let mut problems = Vec::new();
        let mut listed = BTreeSet::new();
        for entry in &state.iterations {
            if !listed.insert(entry.date) {
                problems.push(Discrepancy::DuplicateEntry(entry.date));
                continue;
            }
            if !on_disk.contains(&entry.date) {
                problems.push(Discrepancy::MissingFolder(entry.date));
            } else if !project_dir.join(&entry.output_path).is_file() {
                problems.push(Discrepancy::MissingOutput(entry.date));
            }
        }
        problems.extend(
            on_disk
                .difference(&listed)
                .map(|date| Discrepancy::UntrackedFolder(*date)),
        );

        Ok(problems)
    }

    /// Sorted names of all folders directly under the projects directory
    pub fn project_slugs(&self) -> Result<Vec<String>> {
        let dir = self.layout.projects_dir();
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::io(dir, e)),
        };

        let mut slugs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| Error::io(dir, e))?;
            if entry.path().is_dir() {
                slugs.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        slugs.sort();
        Ok(slugs)
    }

    fn write_iteration(
        &self,
        slug: &str,
        mut state: ProjectState,
        created_project: bool,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<IterationOutcome> {
        let project_dir = self.layout.project_dir(slug);
        let iteration_dir = self.layout.iteration_dir(slug, date);
        let state_path = self.layout.state_path(slug);
        let created_dirs = CreatedDirs::create(&project_dir, &iteration_dir)?;

        let previous = (!created_project).then(|| state.clone());
        let new_entry = state.record_iteration(date);
        let number = state.iteration_number(date).unwrap_or(state.iterations.len());
        let output_path = self.layout.output_path(slug, date);
        let body = render_output(&state, date, number, notes);

        // output.md only replaces the old artifact once state.json is saved
        let staged = storage::stage(&output_path, body.as_bytes())?;
        if let Err(e) = state.save(&state_path) {
            storage::discard(&staged);
            return Err(e);
        }
        if let Err(e) = storage::commit(&staged, &output_path) {
            match previous {
                Some(previous) => {
                    let _ = previous.save(&state_path);
                }
                None => {
                    let _ = fs::remove_file(&state_path);
                }
            }
            return Err(e);
        }
        created_dirs.keep();

        if created_project {
            info!(slug, "created project");
        }
        if new_entry {
            info!(slug, %date, number, "recorded iteration");
        } else {
            debug!(slug, %date, "rewrote existing iteration");
        }

        Ok(IterationOutcome {
            slug: slug.to_string(),
            date,
            number,
            output_path,
            created_project,
            new_entry,
        })
    }
}
