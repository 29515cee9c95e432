//! `pcbench.toml` configuration.
//!
//! Every field has a default, so a missing file or a partial table is valid.
//! The CLI applies flag overrides on top of the loaded values.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "pcbench.toml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub bench: BenchConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchConfig {
    /// Budget for standalone benchmarks such as the sanity check.
    pub budget_us: u64,
    /// Budget for each entry of the container grid.
    pub grid_budget_us: u64,
    pub warmup_us: u64,
    /// Value written to the `sys` column.
    pub system: String,
    pub output: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            budget_us: 100_000,
            grid_budget_us: 2,
            warmup_us: 100_000,
            system: "rust".to_string(),
            output: PathBuf::from("benchmark/results_rust.csv"),
        }
    }
}

impl BenchConfig {
    pub fn budget(&self) -> Duration {
        Duration::from_micros(self.budget_us)
    }

    pub fn grid_budget(&self) -> Duration {
        Duration::from_micros(self.grid_budget_us)
    }

    pub fn warmup(&self) -> Duration {
        Duration::from_micros(self.warmup_us)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Directory scanned recursively for result CSVs.
    pub root: PathBuf,
    pub output: PathBuf,
    /// Label whose row becomes the baseline of every group containing it.
    pub baseline: Option<String>,
    pub print_console: bool,
    pub write_csv: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("benchmark"),
            output: PathBuf::from("benchmarks.csv"),
            baseline: None,
            print_console: true,
            write_csv: true,
        }
    }
}

impl Config {
    pub fn from_toml_str(src: &str) -> Result<Self> {
        toml::from_str(src).context("parse pcbench configuration")
    }

    /// Loads `path`, or defaults when `path` does not exist and `required` is false.
    pub fn load(path: &Path, required: bool) -> Result<Self> {
        if !path.exists() && !required {
            return Ok(Self::default());
        }
        let src = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("load config {}", path.display()))
    }
}
