//! The `git log --pretty` template used to emit one JSON object per commit.

/// Literal token emitted after every commit record.
pub const LOG_SENTINEL: &str = "[lex_break]";

/// How a field is embedded in the JSON template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Quoted string value.
    Text,
    /// Bare numeric value.
    Number,
}

/// A single JSON key and the git placeholder that fills it.
#[derive(Debug, Clone, Copy)]
pub struct LogField {
    pub key: &'static str,
    pub placeholder: &'static str,
    pub kind: FieldKind,
}

/// Field table for the retrieval format, in emission order.
///
/// `tag` carries the raw ref decoration (`%D`) and `date` the committer time
/// (`%ct`) in Unix epoch seconds.
pub const LOG_FIELDS: &[LogField] = &[
    LogField { key: "authorName", placeholder: "%an", kind: FieldKind::Text },
    LogField { key: "authorEmail", placeholder: "%ae", kind: FieldKind::Text },
    LogField { key: "hashShort", placeholder: "%h", kind: FieldKind::Text },
    LogField { key: "hashFull", placeholder: "%H", kind: FieldKind::Text },
    LogField { key: "tag", placeholder: "%D", kind: FieldKind::Text },
    LogField { key: "date", placeholder: "%ct", kind: FieldKind::Number },
    LogField { key: "subject", placeholder: "%s", kind: FieldKind::Text },
    LogField { key: "comments", placeholder: "%b", kind: FieldKind::Text },
];

/// Build the `--pretty=format:` template from [`LOG_FIELDS`].
pub fn pretty_format() -> String {
    let fields: Vec<String> = LOG_FIELDS
        .iter()
        .map(|field| match field.kind {
            FieldKind::Text => format!("\"{}\":\"{}\"", field.key, field.placeholder),
            FieldKind::Number => format!("\"{}\":{}", field.key, field.placeholder),
        })
        .collect();

    format!("{{{}}}{}", fields.join(","), LOG_SENTINEL)
}

/// Arguments passed to `git` to list the `limit` most recent commits.
pub fn log_args(limit: usize) -> Vec<String> {
    vec![
        "log".to_string(),
        "-n".to_string(),
        limit.to_string(),
        format!("--pretty=format:{}", pretty_format()),
    ]
}
