use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Every `.csv` file under `root`, in directory-traversal order.
///
/// The order is whatever the filesystem yields; callers that need a stable
/// order sort the parsed rows, not the paths.
pub fn find_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.with_context(|| format!("scan {}", root.display()))?;
        if entry.file_type().is_file() && is_csv(entry.path()) {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

pub fn is_csv(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "csv")
}
