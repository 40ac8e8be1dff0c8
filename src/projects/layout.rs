// Paths inside the projects directory

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::config::constants::{DATE_FORMAT, ITERATION_PREFIX, OUTPUT_FILE, STATE_FILE};

/// `iteration_<date>`
pub fn iteration_folder_name(date: NaiveDate) -> String {
    format!("{}{}", ITERATION_PREFIX, date.format(DATE_FORMAT))
}

/// `iteration_<date>/output.md`, the form stored in state.json
pub fn relative_output_path(date: NaiveDate) -> String {
    format!("{}/{}", iteration_folder_name(date), OUTPUT_FILE)
}

/// Inverse of [`iteration_folder_name`]. Only the canonical zero-padded form matches.
pub fn parse_iteration_folder(name: &str) -> Option<NaiveDate> {
    let raw = name.strip_prefix(ITERATION_PREFIX)?;
    let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == raw).then_some(date)
}

/// Resolves per-project paths under one projects directory
#[derive(Debug, Clone)]
pub struct ProjectLayout {
    projects_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new(projects_dir: impl Into<PathBuf>) -> Self {
        Self {
            projects_dir: projects_dir.into(),
        }
    }

    pub fn projects_dir(&self) -> &Path {
        &self.projects_dir
    }

    pub fn project_dir(&self, slug: &str) -> PathBuf {
        self.projects_dir.join(slug)
    }

    pub fn state_path(&self, slug: &str) -> PathBuf {
        self.project_dir(slug).join(STATE_FILE)
    }

    pub fn iteration_dir(&self, slug: &str, date: NaiveDate) -> PathBuf {
        self.project_dir(slug).join(iteration_folder_name(date))
    }

    pub fn output_path(&self, slug: &str, date: NaiveDate) -> PathBuf {
        self.iteration_dir(slug, date).join(OUTPUT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_paths() {
        let layout = ProjectLayout::new("/data/projects");
        assert_eq!(
            layout.output_path("my-cool-idea", d("2024-01-01")),
            PathBuf::from("/data/projects/my-cool-idea/iteration_2024-01-01/output.md")
        );
        assert_eq!(
            layout.state_path("my-cool-idea"),
            PathBuf::from("/data/projects/my-cool-idea/state.json")
        );
        assert_eq!(
            relative_output_path(d("2024-01-01")),
            "iteration_2024-01-01/output.md"
        );
    }

    #[test]
    fn test_parse_iteration_folder() {
        assert_eq!(
            parse_iteration_folder("iteration_2024-01-01"),
            Some(d("2024-01-01"))
        );
        assert_eq!(parse_iteration_folder("iteration_2024-1-1"), None);
        assert_eq!(parse_iteration_folder("iteration_2024-13-01"), None);
        assert_eq!(parse_iteration_folder("notes"), None);
    }
}
