//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};

use git2::{Oid, Repository, Signature, Time};
use lexlog::CommitRecord;

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Get the path to a raw `git log` fixture.
pub fn log_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("logs").join(name)
}

/// Get the path to an expected changelog fixture.
pub fn changelog_fixture(name: &str) -> PathBuf {
    fixtures_dir().join("changelogs").join(name)
}

/// Read a fixture file as a string.
pub fn read_fixture(path: PathBuf) -> String {
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {:?}: {}", path, e))
}

/// Create a temporary directory for test output.
pub fn temp_test_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Build a commit record without going through git.
pub fn record(hash_short: &str, refs: &str, comments: &str, timestamp: i64) -> CommitRecord {
    CommitRecord {
        author_name: "Test User".to_string(),
        author_email: "test@example.com".to_string(),
        hash_short: hash_short.to_string(),
        hash_full: format!("{}0000", hash_short),
        refs: refs.to_string(),
        timestamp_seconds: timestamp,
        subject: String::new(),
        comments: comments.to_string(),
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
    next_time: std::cell::Cell<i64>,
}

impl TestRepo {
    /// Create a new empty git repository in a temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");
        Self {
            dir,
            repo,
            next_time: std::cell::Cell::new(1_700_000_000),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Test signature with a strictly increasing commit time, so `git log`
    /// order is deterministic.
    fn signature(&self) -> Signature<'static> {
        let seconds = self.next_time.get();
        self.next_time.set(seconds + 60);
        Signature::new("Test User", "test@example.com", &Time::new(seconds, 0))
            .expect("Failed to create signature")
    }

    /// Create a commit with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        self.commit_as(message, &sig, &sig)
    }

    /// Create a commit whose author and committer times differ, as after a
    /// rebase or amend.
    pub fn commit_with_times(&self, message: &str, author_secs: i64, committer_secs: i64) -> Oid {
        let author = Signature::new("Test User", "test@example.com", &Time::new(author_secs, 0))
            .expect("Failed to create author signature");
        let committer =
            Signature::new("Test User", "test@example.com", &Time::new(committer_secs, 0))
                .expect("Failed to create committer signature");
        self.commit_as(message, &author, &committer)
    }

    fn commit_as(&self, message: &str, author: &Signature, committer: &Signature) -> Oid {
        // Create or update a file to have something to commit
        let file_path = self.dir.path().join("test.txt");
        std::fs::write(&file_path, format!("{}\n{}", message, committer.when().seconds()))
            .expect("Failed to write test file");

        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new("test.txt")).expect("Failed to add file");
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), author, committer, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Commit time of the given commit, in epoch seconds.
    pub fn commit_time(&self, oid: Oid) -> i64 {
        self.repo
            .find_commit(oid)
            .expect("Failed to find commit")
            .time()
            .seconds()
    }

    /// Create a lightweight tag pointing to the given OID.
    pub fn tag_lightweight(&self, name: &str, oid: Oid) {
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &obj, false)
            .expect("Failed to create lightweight tag");
    }

    /// Create an annotated tag pointing to the given OID.
    pub fn tag_annotated(&self, name: &str, oid: Oid, message: &str) {
        let sig = self.signature();
        let obj = self.repo.find_object(oid, None).expect("Failed to find object");
        self.repo
            .tag(name, &obj, &sig, message, false)
            .expect("Failed to create annotated tag");
    }
}
