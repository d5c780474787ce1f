//! Version boundary tracking across the newest-first commit stream.

use chrono::{TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, warn};

use crate::git::CommitRecord;

use super::conventional::extract_entries;

/// Label used for commits newer than any release tag.
pub const UNRELEASED: &str = "Unreleased";

/// Ref token prefix that marks a release tag.
const TAG_PREFIX: &str = "tag: v";

/// One extracted changelog line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeEntry {
    pub author_name: String,
    pub author_email: String,
    pub hash_short: String,
    pub hash_full: String,
    pub details: String,
}

/// Entries sharing a conventional-commit scope. The name may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeGroup {
    pub name: String,
    pub entries: Vec<ChangeEntry>,
}

/// All entries attributed to one version, scopes in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VersionGroup {
    pub version: String,
    pub date: Option<String>,
    pub scopes: Vec<ScopeGroup>,
}

impl VersionGroup {
    pub fn new(version: impl Into<String>, date: Option<String>) -> Self {
        Self {
            version: version.into(),
            date,
            scopes: Vec::new(),
        }
    }

    /// Append `entry` to `scope`, creating the bucket on first use.
    pub fn push_entry(&mut self, scope: &str, entry: ChangeEntry) {
        match self.scopes.iter_mut().find(|s| s.name == scope) {
            Some(existing) => existing.entries.push(entry),
            None => self.scopes.push(ScopeGroup {
                name: scope.to_string(),
                entries: vec![entry],
            }),
        }
    }

    pub fn scope(&self, name: &str) -> Option<&ScopeGroup> {
        self.scopes.iter().find(|s| s.name == name)
    }

    pub fn entry_count(&self) -> usize {
        self.scopes.iter().map(|s| s.entries.len()).sum()
    }
}

/// Fold state for walking commit records.
///
/// Owns the current-version cursor and every [`VersionGroup`]; groups stay
/// in discovery order.
#[derive(Debug, Clone)]
pub struct VersionTracker {
    current_version: String,
    groups: Vec<VersionGroup>,
}

impl Default for VersionTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionTracker {
    pub fn new() -> Self {
        Self {
            current_version: UNRELEASED.to_string(),
            groups: Vec::new(),
        }
    }

    pub fn current_version(&self) -> &str {
        &self.current_version
    }

    /// Advance the fold by one record.
    pub fn step(mut self, record: &CommitRecord) -> Self {
        if let Some(version) = find_release_tag(&record.refs) {
            debug!(version, hash = %record.hash_short, "Found release tag");
            self.current_version = version.to_string();

            if self.position(version).is_none() {
                let date = format_release_date(record.timestamp_seconds);
                self.groups.push(VersionGroup::new(version, date));
            }
        }

        let index = match self.position(&self.current_version) {
            Some(index) => index,
            None => {
                self.groups
                    .push(VersionGroup::new(self.current_version.clone(), None));
                self.groups.len() - 1
            }
        };

        extract_entries(record, &mut self.groups[index]);
        self
    }

    pub fn finish(self) -> Vec<VersionGroup> {
        self.groups
    }

    fn position(&self, version: &str) -> Option<usize> {
        self.groups.iter().position(|g| g.version == version)
    }
}

/// Group records (newest first) into versions.
pub fn group_by_version(records: &[CommitRecord]) -> Vec<VersionGroup> {
    records
        .iter()
        .fold(VersionTracker::new(), VersionTracker::step)
        .finish()
}

/// Return the version of the first `tag: v<version>` token in a ref string.
pub fn find_release_tag(refs: &str) -> Option<&str> {
    if refs.is_empty() {
        return None;
    }

    refs.split(", ")
        .filter_map(|token| token.trim().strip_prefix(TAG_PREFIX))
        .map(str::trim)
        .find(|version| !version.is_empty())
}

/// Format a commit time as a long date, e.g. `November 14, 2023` (UTC).
pub fn format_release_date(timestamp_seconds: i64) -> Option<String> {
    match Utc.timestamp_opt(timestamp_seconds, 0).single() {
        Some(time) => Some(time.format("%B %-d, %Y").to_string()),
        None => {
            warn!(timestamp_seconds, "Commit has invalid timestamp, leaving release date blank");
            None
        }
    }
}
