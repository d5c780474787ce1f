//! Persist the rendered changelog document.

#[cfg(unix)]
use std::fs::Permissions;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use tracing::info;

use crate::error::ChangelogError;

/// Default output file name, relative to the working directory.
pub const DEFAULT_OUTPUT_FILE: &str = "changelog.tmp.md";

/// Write `content` to `<cwd>/<output_file>`, replacing any existing file.
///
/// The document is written to a temp file in the target directory and then
/// renamed over the destination, so readers never observe a partial file.
/// An existing file keeps its permissions; a new one gets the same mode
/// `std::fs::write` would give it.
pub fn write_document(
    cwd: &Path,
    output_file: &str,
    content: &str,
) -> Result<PathBuf, ChangelogError> {
    let path = cwd.join(output_file);
    let dir = path.parent().unwrap_or(cwd);

    let write_failed = |source: std::io::Error| ChangelogError::WriteFailed {
        path: path.clone(),
        source,
    };

    let existing = std::fs::metadata(&path).ok().map(|meta| meta.permissions());

    let mut temp = create_temp(dir, existing.is_none()).map_err(write_failed)?;
    if let Some(permissions) = existing {
        temp.as_file().set_permissions(permissions).map_err(write_failed)?;
    }
    temp.write_all(content.as_bytes()).map_err(write_failed)?;
    temp.persist(&path).map_err(|e| write_failed(e.error))?;

    info!(path = %path.display(), bytes = content.len(), "Wrote changelog");
    Ok(path)
}

/// Temp files default to owner-only access, so a fresh document asks for
/// `0o666` and lets the umask trim it.
fn create_temp(dir: &Path, fresh: bool) -> std::io::Result<NamedTempFile> {
    let mut builder = Builder::new();
    builder.prefix(".changelog").suffix(".tmp");

    #[cfg(unix)]
    if fresh {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(Permissions::from_mode(0o666));
    }
    #[cfg(not(unix))]
    let _ = fresh;

    builder.tempfile_in(dir)
}
