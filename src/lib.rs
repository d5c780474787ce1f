//! lexlog - synthesizes a grouped Markdown changelog from git history.
//!
//! # Overview
//!
//! lexlog reads the most recent commits with `git log`, groups them under the
//! release tag they shipped in, extracts conventional-commit lines from each
//! commit body, and writes the result as a Markdown document.

pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod run;

// Re-export commonly used types
pub use changelog::{ChangeEntry, ScopeGroup, VersionGroup};
pub use config::LexConfig;
pub use error::{ChangelogError, ConfigError, GitError, RunError};
pub use git::CommitRecord;
pub use run::{
    ChangelogOptions, ChangelogReport, create_changelog, report_failure, run_changelog,
};
