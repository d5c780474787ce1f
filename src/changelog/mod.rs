//! Changelog synthesis: version grouping, extraction, rendering and writing.

pub mod conventional;
pub mod render;
pub mod version;
pub mod writer;

pub use render::render_changelog;
pub use version::{ChangeEntry, ScopeGroup, UNRELEASED, VersionGroup, group_by_version};
pub use writer::{DEFAULT_OUTPUT_FILE, write_document};
