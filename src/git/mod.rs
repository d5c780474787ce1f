//! Commit log retrieval and decoding.

pub mod format;
pub mod log;
pub mod record;

pub use format::{LOG_SENTINEL, pretty_format};
pub use log::{DEFAULT_COMMIT_LIMIT, GitExecutor, SystemGit};
pub use record::{CommitRecord, parse_log};
