//! Budgeted, strictly sequential benchmark runner.
//!
//! Every benchmark invokes its function under test at least once and keeps
//! invoking it until the wall-clock time spent since the first call reaches
//! the budget. Completed records are collected in a [`RunLog`] owned by the
//! runner, which is serialised to a results CSV at the end of a run.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures::future::LocalBoxFuture;
use tracing::{debug, info};

use crate::record::{BenchKey, BenchRecord, Stopwatch};
use crate::summary::{RESULTS_HEADER, SummaryRow};

/// Default budget per benchmark.
pub const DEFAULT_BUDGET: Duration = Duration::from_micros(100_000);
/// Pause before the first measurement so the process settles.
pub const DEFAULT_WARMUP: Duration = Duration::from_micros(100_000);

/// Completed records of one run, in the order they finished.
#[derive(Debug, Default)]
pub struct RunLog {
    records: Vec<BenchRecord>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, record: BenchRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[BenchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary_rows(&self, sys: &str) -> Vec<SummaryRow> {
        self.records
            .iter()
            .map(|record| SummaryRow::from_record(record, sys))
            .collect()
    }

    /// Results-file contents: the quoted header followed by one row per record.
    pub fn to_csv(&self, sys: &str) -> String {
        let mut out = String::from(RESULTS_HEADER);
        for row in self.summary_rows(sys) {
            out.push('\n');
            out.push_str(&row.to_csv_row());
        }
        out
    }

    pub fn write_csv(&self, path: &Path, sys: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).with_context(|| format!("create directory {}", parent.display()))?;
        }
        fs::write(path, self.to_csv(sys)).with_context(|| format!("write {}", path.display()))
    }
}

/// Sequential runner holding the default budget and the run's log.
#[derive(Debug)]
pub struct Runner {
    budget: Duration,
    log: RunLog,
}

impl Default for Runner {
    fn default() -> Self {
        Self::new(DEFAULT_BUDGET)
    }
}

impl Runner {
    pub fn new(budget: Duration) -> Self {
        Self {
            budget,
            log: RunLog::new(),
        }
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn log(&self) -> &RunLog {
        &self.log
    }

    pub fn into_log(self) -> RunLog {
        self.log
    }

    /// Runs `f` under the default budget.
    pub fn bench_sync<F>(&mut self, operation: &str, desc: &str, f: F, size: usize, iterations: usize) -> Result<()>
    where
        F: FnMut(&mut BenchRecord, usize, usize) -> Result<()>,
    {
        let budget = self.budget;
        self.bench_sync_with_budget(operation, desc, f, size, iterations, budget)
    }

    pub fn bench_sync_with_budget<F>(
        &mut self,
        operation: &str,
        desc: &str,
        mut f: F,
        size: usize,
        iterations: usize,
        budget: Duration,
    ) -> Result<()>
    where
        F: FnMut(&mut BenchRecord, usize, usize) -> Result<()>,
    {
        let mut record = BenchRecord::new(BenchKey::new(operation, size, iterations), desc);
        let watch = Stopwatch::start();
        let mut invocations = 0usize;
        loop {
            let outcome = f(&mut record, size, iterations);
            outcome.with_context(|| format!("benchmark {} ({desc}) failed", record.key()))?;
            invocations += 1;
            if watch.elapsed() >= budget {
                break;
            }
        }
        self.complete(record, invocations)
    }

    /// Async variant for functions whose single invocation suspends.
    ///
    /// Invocations are still awaited one at a time, in order.
    pub async fn bench_async<F>(&mut self, operation: &str, desc: &str, f: F, size: usize, iterations: usize) -> Result<()>
    where
        F: for<'r> FnMut(&'r mut BenchRecord, usize, usize) -> LocalBoxFuture<'r, Result<()>>,
    {
        let budget = self.budget;
        self.bench_async_with_budget(operation, desc, f, size, iterations, budget)
            .await
    }

    pub async fn bench_async_with_budget<F>(
        &mut self,
        operation: &str,
        desc: &str,
        mut f: F,
        size: usize,
        iterations: usize,
        budget: Duration,
    ) -> Result<()>
    where
        F: for<'r> FnMut(&'r mut BenchRecord, usize, usize) -> LocalBoxFuture<'r, Result<()>>,
    {
        let mut record = BenchRecord::new(BenchKey::new(operation, size, iterations), desc);
        let watch = Stopwatch::start();
        let mut invocations = 0usize;
        loop {
            let outcome = f(&mut record, size, iterations).await;
            outcome.with_context(|| format!("benchmark {} ({desc}) failed", record.key()))?;
            invocations += 1;
            if watch.elapsed() >= budget {
                break;
            }
        }
        self.complete(record, invocations)
    }

    fn complete(&mut self, record: BenchRecord, invocations: usize) -> Result<()> {
        if record.samples().is_empty() {
            bail!(
                "benchmark {} ({}) recorded no samples over {} invocation(s)",
                record.key(),
                record.desc(),
                invocations
            );
        }
        debug!(
            key = %record.key(),
            desc = record.desc(),
            invocations,
            samples = record.samples().len(),
            "benchmark complete"
        );
        info!("done {}", record.key());
        self.log.push(record);
        Ok(())
    }
}

/// Sleeps for `duration` before measurements start.
pub async fn warmup(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    debug!(micros = duration.as_micros() as u64, "warming up");
    tokio::time::sleep(duration).await;
}
