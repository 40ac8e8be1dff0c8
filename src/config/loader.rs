// Configuration loader
// Resolves the data root, then overlays idealoop.toml on the defaults

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::constants::{ROOT_CONFIG_FILE, ROOT_ENV_VAR};
use super::settings::{Config, FileConfig};

/// Load configuration for a CLI invocation.
///
/// Root: `root` argument, then `$IDEALOOP_ROOT`, then the current directory.
/// Config file: `config_file` argument (must exist), then `<root>/idealoop.toml`,
/// then `<config_dir>/idealoop/config.toml`. Missing files mean defaults.
pub fn load_config(root: Option<PathBuf>, config_file: Option<&Path>) -> Result<Config> {
    let root = resolve_root(root)?;

    if config_file.is_none() && !root.join(ROOT_CONFIG_FILE).exists() {
        if let Some(user_config) = user_config_path().filter(|p| p.exists()) {
            return load_config_from(root, Some(&user_config));
        }
    }

    load_config_from(root, config_file)
}

/// Load configuration for a known root, considering only the explicit file
/// and `<root>/idealoop.toml`.
pub fn load_config_from(root: PathBuf, config_file: Option<&Path>) -> Result<Config> {
    let mut config = Config::new(root);

    let path = match config_file {
        Some(path) => {
            if !path.exists() {
                bail!("Configuration file not found: {}", path.display());
            }
            Some(path.to_path_buf())
        }
        None => Some(config.root.join(ROOT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    if let Some(path) = path {
        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        let file: FileConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!(path = %path.display(), "loaded configuration file");
        config.apply(file);
    }

    config
        .validate()
        .context("Configuration validation failed")?;

    Ok(config)
}

fn resolve_root(root: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(root) = root {
        return Ok(root);
    }
    if let Ok(root) = std::env::var(ROOT_ENV_VAR) {
        if !root.is_empty() {
            return Ok(PathBuf::from(root));
        }
    }
    std::env::current_dir().context("Could not determine current directory")
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("idealoop").join("config.toml"))
}
