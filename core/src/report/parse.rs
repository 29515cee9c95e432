//! Result CSV parsing.
//!
//! Rows are converted to [`ResultRow`] once, at the file boundary; everything
//! downstream works with typed fields.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use futures::future::try_join_all;
use tracing::{error, info};

/// Columns every results file must carry, located by header name.
pub const RESULT_COLUMNS: [&str; 8] = ["key", "sys", "desc", "runs", "minimum", "maximum", "mean", "median"];

#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub key: String,
    pub sys: String,
    pub desc: String,
    pub runs: u64,
    pub minimum: f64,
    pub maximum: f64,
    pub mean: f64,
    pub median: f64,
}

/// Splits one CSV line into fields, unquoting `"..."` fields and `""` escapes.
pub fn split_fields(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                other => field.push(other),
            }
        } else {
            match c {
                '"' => in_quotes = true,
                ',' => fields.push(std::mem::take(&mut field)),
                other => field.push(other),
            }
        }
    }
    if in_quotes {
        bail!("unterminated quoted field");
    }
    fields.push(field);
    Ok(fields)
}

/// Parses a header-plus-rows results document. Blank lines are ignored and
/// extra columns are tolerated.
pub fn parse_results(src: &str) -> Result<Vec<ResultRow>> {
    let mut lines = src
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let Some((_, header_line)) = lines.next() else {
        return Ok(Vec::new());
    };
    let header = split_fields(header_line).context("parse header")?;
    let mut index = [0usize; RESULT_COLUMNS.len()];
    for (slot, column) in index.iter_mut().zip(RESULT_COLUMNS) {
        *slot = header
            .iter()
            .position(|h| h.trim() == column)
            .ok_or_else(|| anyhow!("missing column `{column}`"))?;
    }

    let mut rows = Vec::new();
    for (line_no, line) in lines {
        let line_no = line_no + 1;
        let fields = split_fields(line).with_context(|| format!("line {line_no}"))?;
        if fields.len() != header.len() {
            bail!(
                "line {line_no}: expected {} fields, found {}",
                header.len(),
                fields.len()
            );
        }
        let get = |i: usize| fields[index[i]].trim();
        rows.push(ResultRow {
            key: get(0).to_string(),
            sys: get(1).to_string(),
            desc: get(2).to_string(),
            runs: parse_field(get(3), "runs", line_no)?,
            minimum: parse_field(get(4), "minimum", line_no)?,
            maximum: parse_field(get(5), "maximum", line_no)?,
            mean: parse_field(get(6), "mean", line_no)?,
            median: parse_field(get(7), "median", line_no)?,
        });
    }
    Ok(rows)
}

fn parse_field<T>(raw: &str, column: &str, line_no: usize) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse()
        .with_context(|| format!("line {line_no}: column `{column}` has invalid value {raw:?}"))
}

pub async fn read_results(path: &Path) -> Result<Vec<ResultRow>> {
    let src = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read {}", path.display()))?;
    parse_results(&src).with_context(|| format!("parse {}", path.display()))
}

/// Reads every file concurrently and concatenates the rows in `files` order.
///
/// A failure on any file fails the whole read; no partial row set is returned.
pub async fn read_all(files: &[PathBuf]) -> Result<Vec<ResultRow>> {
    let reads = files.iter().map(|path| async move {
        match read_results(path).await {
            Ok(rows) => {
                info!("Finished reading {}", path.display());
                Ok(rows)
            }
            Err(err) => {
                error!("Error reading {}: {:#}", path.display(), err);
                Err(err)
            }
        }
    });
    let per_file = try_join_all(reads).await?;
    Ok(per_file.into_iter().flatten().collect())
}
