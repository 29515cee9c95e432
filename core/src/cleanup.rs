use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::report::find_csv_files;

/// Deletes every `.csv` file under `root` and returns the deleted paths.
pub fn remove_csv_files(root: &Path) -> Result<Vec<PathBuf>> {
    let files = find_csv_files(root)?;
    for file in &files {
        info!("Deleting: {}", file.display());
        fs::remove_file(file).with_context(|| format!("remove {}", file.display()))?;
    }
    Ok(files)
}
