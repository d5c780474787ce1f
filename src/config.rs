//! Project configuration loaded from `lex.config.json`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// File looked up in the working directory when no explicit path is given.
pub const CONFIG_FILE_NAME: &str = "lex.config.json";

/// Settings the changelog engine reads from the project config.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LexConfig {
    /// Base URL of the hosted repository, used for commit links.
    #[serde(default)]
    pub git_url: Option<String>,
}

impl LexConfig {
    /// Replace `git_url` when an override is present.
    pub fn with_git_url(mut self, git_url: Option<String>) -> Self {
        if git_url.is_some() {
            self.git_url = git_url;
        }
        self
    }
}

/// Load the config for `cwd`.
///
/// An explicit `path` must exist. Without one, a missing
/// `<cwd>/lex.config.json` yields the default config.
pub fn load_config(cwd: &Path, path: Option<&Path>) -> Result<LexConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (cwd.join(path), true),
        None => (cwd.join(CONFIG_FILE_NAME), false),
    };

    if !required && !path.exists() {
        debug!(path = %path.display(), "No config file found, using defaults");
        return Ok(LexConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFailed {
        path: path.clone(),
        source,
    })?;

    parse_config(&content, path)
}

fn parse_config(content: &str, path: PathBuf) -> Result<LexConfig, ConfigError> {
    let config = serde_json::from_str(content)
        .map_err(|source| ConfigError::ParseFailed { path: path.clone(), source })?;
    debug!(path = %path.display(), "Loaded config");
    Ok(config)
}
