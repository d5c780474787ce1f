//! Commit log retrieval by spawning the system `git` binary.

use std::env;
use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use git2::Repository;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::GitError;

use super::format::log_args;

/// Default number of commits to retrieve.
pub const DEFAULT_COMMIT_LIMIT: usize = 3;

/// Environment variable that bounds how long `git log` may run.
const TIMEOUT_ENV_VAR: &str = "LEXLOG_GIT_TIMEOUT";

/// Get the configured timeout, if any.
///
/// Without `LEXLOG_GIT_TIMEOUT` the subprocess is awaited indefinitely.
/// An unparsable value logs a warning and is ignored.
fn get_timeout() -> Option<Duration> {
    match env::var(TIMEOUT_ENV_VAR) {
        Ok(v) if !v.is_empty() => match v.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                warn!(
                    "Invalid {} value '{}', running git without a timeout",
                    TIMEOUT_ENV_VAR, v
                );
                None
            }
        },
        _ => None,
    }
}

/// Trait for retrieving raw commit log text.
///
/// This abstraction allows mocking the git subprocess in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Return the formatted log of the `limit` most recent commits in `cwd`.
    async fn log(&self, cwd: &Path, limit: usize) -> Result<String, GitError>;
}

/// Executor that calls the real `git` binary.
pub struct SystemGit;

#[async_trait]
impl GitExecutor for SystemGit {
    async fn log(&self, cwd: &Path, limit: usize) -> Result<String, GitError> {
        check_git_installed()?;
        ensure_repository(cwd)?;
        run_git_log(cwd, limit).await
    }
}

/// Check that a `git` executable is reachable on `PATH`.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git").map_err(|_| GitError::NotInstalled)?;
    Ok(())
}

/// Check that `cwd` lives inside a git repository.
pub fn ensure_repository(cwd: &Path) -> Result<(), GitError> {
    let repo = Repository::discover(cwd).map_err(GitError::NotARepository)?;
    debug!(git_dir = %repo.path().display(), "Found repository");
    Ok(())
}

/// Run `git log` and return its stdout.
pub async fn run_git_log(cwd: &Path, limit: usize) -> Result<String, GitError> {
    let mut command = Command::new("git");
    command
        .args(log_args(limit))
        .current_dir(cwd)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!(limit, cwd = %cwd.display(), "Running git log");

    let output = match get_timeout() {
        Some(duration) => timeout(duration, command.output())
            .await
            .map_err(|_| GitError::Timeout(duration.as_secs()))?,
        None => command.output().await,
    }
    .map_err(GitError::SpawnFailed)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let code = output.status.code().unwrap_or(-1);
        return Err(GitError::NonZeroExit { code, stderr });
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
