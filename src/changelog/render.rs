//! Markdown rendering of grouped changelog entries.

use url::Url;

use super::version::{ChangeEntry, VersionGroup};

/// Top-level heading of every generated document.
pub const CHANGELOG_HEADING: &str = "# Changes";

/// Render version groups, in the given order, as a Markdown document.
///
/// Each group opens with `## <version> (<date>)`. A group without a date, such
/// as `Unreleased`, renders as `## <version>` without empty parentheses.
pub fn render_changelog(groups: &[VersionGroup], git_url: Option<&str>) -> String {
    let mut doc = String::new();
    doc.push_str(CHANGELOG_HEADING);
    doc.push('\n');

    for group in groups {
        match &group.date {
            Some(date) => doc.push_str(&format!("\n## {} ({})\n", group.version, date)),
            None => doc.push_str(&format!("\n## {}\n", group.version)),
        }

        for scope in &group.scopes {
            doc.push_str(&format!("\n### {}\n\n", scope.name));

            for entry in &scope.entries {
                doc.push_str(&format_entry(entry, git_url));
                doc.push('\n');
            }
        }
    }

    doc
}

/// Format one bullet line.
pub fn format_entry(entry: &ChangeEntry, git_url: Option<&str>) -> String {
    format!(
        "  * {} ([{}](mailto:{}) in {})",
        entry.details,
        entry.author_name,
        entry.author_email,
        hash_link(entry, git_url)
    )
}

/// Link to the commit on its hosting service, or a bare `#hash` reference.
///
/// GitHub serves commits under `/commit/`; other hosts (Bitbucket and
/// friends) use `/commits/`.
pub fn hash_link(entry: &ChangeEntry, git_url: Option<&str>) -> String {
    let Some(base) = git_url.map(str::trim).filter(|url| !url.is_empty()) else {
        return format!("#{}", entry.hash_short);
    };

    let base = base.trim_end_matches('/');
    let segment = if is_github(base) { "commit" } else { "commits" };

    format!(
        "[#{}]({}/{}/{})",
        entry.hash_short, base, segment, entry.hash_full
    )
}

fn is_github(base: &str) -> bool {
    match Url::parse(base) {
        Ok(url) => url.host_str().is_some_and(|host| host.contains("github.com")),
        Err(_) => base.contains("github.com"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ChangeEntry {
        ChangeEntry {
            author_name: "Ada".to_string(),
            author_email: "ada@example.com".to_string(),
            hash_short: "abc123".to_string(),
            hash_full: "abc1234567890".to_string(),
            details: "Fix correct typo".to_string(),
        }
    }

    #[test]
    fn test_hash_link_without_url() {
        assert_eq!(hash_link(&entry(), None), "#abc123");
        assert_eq!(hash_link(&entry(), Some("")), "#abc123");
    }

    #[test]
    fn test_hash_link_github() {
        assert_eq!(
            hash_link(&entry(), Some("https://github.com/org/repo")),
            "[#abc123](https://github.com/org/repo/commit/abc1234567890)"
        );
    }

    #[test]
    fn test_hash_link_other_host() {
        assert_eq!(
            hash_link(&entry(), Some("https://bitbucket.org/org/repo/")),
            "[#abc123](https://bitbucket.org/org/repo/commits/abc1234567890)"
        );
    }

    #[test]
    fn test_hash_link_github_in_path_only_is_not_github() {
        assert_eq!(
            hash_link(&entry(), Some("https://git.example.com/github.com/repo")),
            "[#abc123](https://git.example.com/github.com/repo/commits/abc1234567890)"
        );
    }

    #[test]
    fn test_format_entry() {
        assert_eq!(
            format_entry(&entry(), None),
            "  * Fix correct typo ([Ada](mailto:ada@example.com) in #abc123)"
        );
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_changelog(&[], None), "# Changes\n");
    }

    #[test]
    fn test_render_blank_scope_and_missing_date() {
        let mut group = VersionGroup::new("Unreleased", None);
        group.push_entry("", entry());

        let doc = render_changelog(&[group], None);

        assert_eq!(
            doc,
            "# Changes\n\n## Unreleased\n\n### \n\n  * Fix correct typo ([Ada](mailto:ada@example.com) in #abc123)\n"
        );
    }

    #[test]
    fn test_render_keeps_group_and_scope_order() {
        let mut newer = VersionGroup::new("2.0.0", Some("March 1, 2024".to_string()));
        newer.push_entry("zeta", entry());
        newer.push_entry("alpha", entry());
        let older = VersionGroup::new("1.0.0", Some("January 1, 2024".to_string()));

        let doc = render_changelog(&[newer, older], None);

        let positions: Vec<usize> = [
            "## 2.0.0 (March 1, 2024)",
            "### zeta",
            "### alpha",
            "## 1.0.0 (January 1, 2024)",
        ]
        .iter()
        .map(|needle| doc.find(needle).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
