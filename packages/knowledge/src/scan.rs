//! Directory scanning for extraction candidates.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{KnowledgeError, Result};

/// Recursively collect regular files under `root` whose extension matches
/// `extension` (case-insensitive, with or without a leading dot).
///
/// Returns absolute paths, sorted so batch runs are deterministic. Fails
/// with [`KnowledgeError::InvalidInput`] when `root` does not exist or is
/// not a directory. Filesystem reads only, no mutation.
pub fn scan_directory(root: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Err(KnowledgeError::InvalidInput {
            path: root.display().to_string(),
        });
    }

    let root = root
        .canonicalize()
        .map_err(|_| KnowledgeError::InvalidInput {
            path: root.display().to_string(),
        })?;

    let wanted = extension.trim_start_matches('.').to_ascii_lowercase();

    let mut files: Vec<PathBuf> = WalkDir::new(&root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.to_string_lossy().eq_ignore_ascii_case(&wanted))
                .unwrap_or(false)
        })
        .collect();

    files.sort();
    debug!(root = %root.display(), count = files.len(), "scanned directory");
    Ok(files)
}
