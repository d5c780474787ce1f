//! Orchestration of a single changelog run: retrieve, parse, group, render, write.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::changelog::{
    DEFAULT_OUTPUT_FILE, VersionGroup, group_by_version, render_changelog, write_document,
};
use crate::config::LexConfig;
use crate::error::RunError;
use crate::git::{DEFAULT_COMMIT_LIMIT, GitExecutor, SystemGit, parse_log};

/// Parameters of one changelog run, typically built from CLI flags.
#[derive(Debug, Clone)]
pub struct ChangelogOptions {
    /// Label used in error messages.
    pub cli_name: String,
    pub config: LexConfig,
    /// File name joined against `cwd`.
    pub output_file: String,
    /// Suppress status output.
    pub quiet: bool,
    /// Number of most recent commits to read.
    pub limit: usize,
    pub cwd: PathBuf,
    /// Print the document instead of writing it.
    pub dry_run: bool,
}

impl ChangelogOptions {
    pub fn new(cli_name: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            cli_name: cli_name.into(),
            config: LexConfig::default(),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            quiet: false,
            limit: DEFAULT_COMMIT_LIMIT,
            cwd: cwd.into(),
            dry_run: false,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct ChangelogReport {
    /// Where the document was written; `None` on a dry run.
    pub path: Option<PathBuf>,
    pub markdown: String,
    pub versions: usize,
    pub entries: usize,
}

/// Turn raw `git log` output into the changelog document and its groups.
pub fn synthesize(
    raw_log: &str,
    git_url: Option<&str>,
) -> Result<(Vec<VersionGroup>, String), RunError> {
    let records = parse_log(raw_log)?;
    let groups = group_by_version(&records);
    let markdown = render_changelog(&groups, git_url);
    Ok((groups, markdown))
}

/// Run the whole pipeline against the given executor.
pub async fn run_changelog<E: GitExecutor>(
    options: &ChangelogOptions,
    executor: &E,
) -> Result<ChangelogReport, RunError> {
    if !options.quiet {
        println!("Reading the last {} commits...", options.limit);
    }

    let raw_log = executor.log(&options.cwd, options.limit).await?;
    let (groups, markdown) = synthesize(&raw_log, options.config.git_url.as_deref())?;

    let versions = groups.len();
    let entries: usize = groups.iter().map(VersionGroup::entry_count).sum();
    info!(versions, entries, "Synthesized changelog");

    let path = if options.dry_run {
        print!("{}", markdown);
        None
    } else {
        let path = write_document(&options.cwd, &options.output_file, &markdown)?;
        if !options.quiet {
            let entry_word = if entries == 1 { "entry" } else { "entries" };
            let version_word = if versions == 1 { "version" } else { "versions" };
            println!(
                "✓ Wrote {} {} across {} {} to {}",
                entries,
                entry_word,
                versions,
                version_word,
                path.display()
            );
        }
        Some(path)
    };

    Ok(ChangelogReport {
        path,
        markdown,
        versions,
        entries,
    })
}

/// Run against the system `git` and report a process-style status.
///
/// Returns `0` on success and `1` on any failure, after reporting the error.
pub async fn create_changelog(options: &ChangelogOptions) -> i32 {
    status_of(options, run_changelog(options, &SystemGit).await)
}

fn status_of(options: &ChangelogOptions, result: Result<ChangelogReport, RunError>) -> i32 {
    match result {
        Ok(_) => 0,
        Err(e) => report_failure(&options.cli_name, &e),
    }
}

/// Report `error` on stderr as `<cli_name> Error: <message>` and return the
/// failure status.
pub fn report_failure(cli_name: &str, error: &RunError) -> i32 {
    debug!(error = ?error, "Changelog run failed");
    eprintln!("{}", failure_message(cli_name, error));
    1
}

fn failure_message(cli_name: &str, error: &RunError) -> String {
    format!("{} Error: {}", cli_name, error)
}
