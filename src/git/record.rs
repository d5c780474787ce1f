//! Decoding of the raw `git log` stream into commit records.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChangelogError;

use super::format::LOG_SENTINEL;

/// One retrieved commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitRecord {
    pub author_name: String,
    pub author_email: String,
    pub hash_short: String,
    pub hash_full: String,
    /// Raw ref decoration, e.g. `HEAD -> main, tag: v1.2.0`. Empty when untagged.
    #[serde(rename = "tag", default)]
    pub refs: String,
    #[serde(rename = "date")]
    pub timestamp_seconds: i64,
    #[serde(default)]
    pub subject: String,
    /// Commit body, newline-delimited.
    #[serde(default)]
    pub comments: String,
}

/// Parse the sentinel-delimited output of `git log` into records.
///
/// Records keep retrieval order (newest first). Empty fragments, such as the
/// one after the trailing sentinel, are discarded.
pub fn parse_log(raw: &str) -> Result<Vec<CommitRecord>, ChangelogError> {
    let fragments: Vec<&str> = raw
        .split(LOG_SENTINEL)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty())
        .collect();

    let json = escape_control_chars(&format!("[{}]", fragments.join(",")));

    let records: Vec<CommitRecord> =
        serde_json::from_str(&json).map_err(ChangelogError::MalformedLog)?;

    debug!(count = records.len(), "Parsed commit records");
    Ok(records)
}

/// Escape raw control characters that appear inside JSON string literals.
///
/// Commit bodies are embedded verbatim by git, so multi-line bodies carry
/// literal newlines. Quotes and backslashes are left untouched.
fn escape_control_chars(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in json.chars() {
        if !in_string {
            if c == '"' {
                in_string = true;
            }
            out.push(c);
            continue;
        }

        if escaped {
            escaped = false;
            out.push(c);
            continue;
        }

        match c {
            '\\' => {
                escaped = true;
                out.push(c);
            }
            '"' => {
                in_string = false;
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }

    out
}
