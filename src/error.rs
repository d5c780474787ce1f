//! Error types for lexlog modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from retrieving the commit log.
#[derive(Error, Debug)]
pub enum GitError {
    #[error("git not found. Install git and make sure it is on your PATH")]
    NotInstalled,

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Failed to spawn git process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git log exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },

    #[error("git log timed out after {0} seconds")]
    Timeout(u64),
}

/// Errors from decoding the log and writing the changelog.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Malformed commit log: {0}")]
    MalformedLog(#[source] serde_json::Error),

    #[error("Failed to write changelog to {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from loading the project configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ParseFailed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure of a changelog run, as seen by the orchestration layer.
#[derive(Error, Debug)]
pub enum RunError {
    #[error(transparent)]
    Git(#[from] GitError),

    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
