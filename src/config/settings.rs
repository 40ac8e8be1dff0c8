// Configuration structs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::constants::*;

/// Resolved runtime configuration.
///
/// `ideas_file` and `projects_dir` are relative to `root` unless absolute.
#[derive(Debug, Clone)]
pub struct Config {
    /// Data root (holds ideas.json and projects/)
    pub root: PathBuf,

    /// Idea store location
    pub ideas_file: PathBuf,

    /// Parent directory of all project folders
    pub projects_dir: PathBuf,

    /// Maximum slug length before truncation
    pub max_slug_len: usize,

    /// Idea text containing any of these (case-insensitive) is rejected
    pub blacklist: Vec<String>,
}

/// On-disk shape of `idealoop.toml`. Every key is optional.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ideas_file: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub projects_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_slug_len: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blacklist: Option<Vec<String>>,
}

impl Config {
    /// Defaults rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ideas_file: PathBuf::from(DEFAULT_IDEAS_FILE),
            projects_dir: PathBuf::from(DEFAULT_PROJECTS_DIR),
            max_slug_len: DEFAULT_MAX_SLUG_LEN,
            blacklist: DEFAULT_BLACKLIST.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Overlay values present in a parsed config file.
    pub fn apply(&mut self, file: FileConfig) {
        if let Some(ideas_file) = file.ideas_file {
            self.ideas_file = ideas_file;
        }
        if let Some(projects_dir) = file.projects_dir {
            self.projects_dir = projects_dir;
        }
        if let Some(max_slug_len) = file.max_slug_len {
            self.max_slug_len = max_slug_len;
        }
        if let Some(blacklist) = file.blacklist {
            self.blacklist = blacklist;
        }
    }

    /// Absolute (or root-relative) path of the idea store
    pub fn ideas_path(&self) -> PathBuf {
        resolve(&self.root, &self.ideas_file)
    }

    /// Absolute (or root-relative) path of the projects directory
    pub fn projects_path(&self) -> PathBuf {
        resolve(&self.root, &self.projects_dir)
    }

    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_slug_len < MIN_SLUG_LEN {
            anyhow::bail!(
                "max_slug_len must be at least {} (got {})",
                MIN_SLUG_LEN,
                self.max_slug_len
            );
        }
        if self.ideas_file.as_os_str().is_empty() {
            anyhow::bail!("ideas_file must not be empty");
        }
        if self.projects_dir.as_os_str().is_empty() {
            anyhow::bail!("projects_dir must not be empty");
        }
        if let Some(idx) = self.blacklist.iter().position(|k| k.trim().is_empty()) {
            anyhow::bail!("blacklist[{}] is empty", idx);
        }
        Ok(())
    }
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = Config::new("/data");
        config.validate().unwrap();
        assert_eq!(config.ideas_path(), PathBuf::from("/data/ideas.json"));
        assert_eq!(config.projects_path(), PathBuf::from("/data/projects"));
        assert!(config.blacklist.iter().any(|k| k == "habit tracker"));
    }

    #[test]
    fn test_apply_overrides_only_present_keys() {
        let mut config = Config::new("/data");
        config.apply(FileConfig {
            projects_dir: Some(PathBuf::from("/elsewhere/projects")),
            max_slug_len: Some(20),
            ..Default::default()
        });
        assert_eq!(config.ideas_path(), PathBuf::from("/data/ideas.json"));
        assert_eq!(config.projects_path(), PathBuf::from("/elsewhere/projects"));
        assert_eq!(config.max_slug_len, 20);
        assert_eq!(config.blacklist.len(), DEFAULT_BLACKLIST.len());
    }

    #[test]
    fn test_validate_rejects_tiny_slug_len() {
        let mut config = Config::new("/data");
        config.max_slug_len = 3;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_blank_keyword() {
        let mut config = Config::new("/data");
        config.blacklist.push("  ".into());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("blacklist"));
    }
}
