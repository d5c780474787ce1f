//! Conventional-commit extraction from commit bodies.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::git::CommitRecord;

use super::version::{ChangeEntry, VersionGroup};

/// Pattern: type(scope): description or type: description
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\w*)(?:\(([\w$.\-* ]*)\))?: (.*)$")
        .expect("conventional commit pattern should compile")
});

/// A body line that follows the conventional-commit header shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalLine<'a> {
    pub commit_type: &'a str,
    pub scope: Option<&'a str>,
    pub description: &'a str,
}

impl ConventionalLine<'_> {
    /// Rendered entry text, e.g. `Fix handle empty input`.
    pub fn details(&self) -> String {
        format!("{} {}", capitalize(self.commit_type), self.description)
    }
}

/// Parse a single (already trimmed) line.
pub fn parse_line(line: &str) -> Option<ConventionalLine<'_>> {
    let caps = HEADER_PATTERN.captures(line)?;

    Some(ConventionalLine {
        commit_type: caps.get(1).map_or("", |m| m.as_str()),
        scope: caps.get(2).map(|m| m.as_str()),
        description: caps.get(3).map_or("", |m| m.as_str()),
    })
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Append one entry per conventional body line of `record` to `group`.
///
/// Lines that do not match are dropped. The subject is never inspected.
/// Returns the number of entries appended.
pub fn extract_entries(record: &CommitRecord, group: &mut VersionGroup) -> usize {
    let mut appended = 0;

    for line in record.comments.split('\n').map(str::trim) {
        let Some(parsed) = parse_line(line) else {
            continue;
        };

        group.push_entry(
            parsed.scope.unwrap_or(""),
            ChangeEntry {
                author_name: record.author_name.clone(),
                author_email: record.author_email.clone(),
                hash_short: record.hash_short.clone(),
                hash_full: record.hash_full.clone(),
                details: parsed.details(),
            },
        );
        appended += 1;
    }

    appended
}
