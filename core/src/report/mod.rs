//! Merge every result CSV under a directory into one comparison report.
//!
//! The pipeline is linear: discover files, read them concurrently, sort and
//! group the rows by benchmark key, compute ratios against each group's
//! baseline, then render. Nothing is printed or written until every file has
//! been read and parsed.

pub mod discover;
pub mod parse;
pub mod render;
pub mod table;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use crate::config::ReportConfig;

pub use discover::find_csv_files;
pub use parse::{ResultRow, read_all};
pub use table::{ComparisonTable, build_tables};

pub const NO_INPUT_NOTICE: &str = "No CSV files found in the directory.";

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub files: Vec<PathBuf>,
    pub tables: Vec<ComparisonTable>,
}

impl Report {
    pub fn row_count(&self) -> usize {
        self.tables.iter().map(|t| t.rows().len()).sum()
    }

    pub fn console_table(&self) -> String {
        render::console_table(&self.tables)
    }

    pub fn full_csv(&self) -> String {
        render::full_csv(&self.tables)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportOutcome {
    NoInput,
    Generated { files: usize, rows: usize, groups: usize },
}

/// Discovers, reads and groups result rows. `Ok(None)` when no file is found.
///
/// `exclude` is skipped during discovery, so a previous combined report that
/// lives under `root` is not read back as input.
pub async fn build_report(root: &Path, exclude: Option<&Path>, baseline: Option<&str>) -> Result<Option<Report>> {
    let mut files = find_csv_files(root)?;
    if let Some(excluded) = exclude.and_then(|p| fs::canonicalize(p).ok()) {
        files.retain(|f| fs::canonicalize(f).map(|c| c != excluded).unwrap_or(true));
    }
    if files.is_empty() {
        return Ok(None);
    }

    let rows = read_all(&files).await?;
    let tables = build_tables(rows, baseline);
    Ok(Some(Report { files, tables }))
}

/// Runs the report as configured, printing to `console` and writing the
/// combined CSV. The file is written before anything is printed.
pub async fn run_report<W: Write>(config: &ReportConfig, console: &mut W) -> Result<ReportOutcome> {
    let report = build_report(&config.root, Some(&config.output), config.baseline.as_deref()).await?;
    let Some(report) = report else {
        writeln!(console, "{NO_INPUT_NOTICE}")?;
        return Ok(ReportOutcome::NoInput);
    };

    let table = report.console_table();
    if config.write_csv {
        write_report(&config.output, &report.full_csv())?;
        info!(path = %config.output.display(), "report written");
    }
    if config.print_console {
        write!(console, "{table}")?;
    }

    Ok(ReportOutcome::Generated {
        files: report.files.len(),
        rows: report.row_count(),
        groups: report.tables.len(),
    })
}

fn write_report(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("write report {}", path.display()))
}
