pub mod cleanup;
pub mod config;
pub mod record;
pub mod report;
pub mod runner;
pub mod summary;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod runner_test;
#[cfg(test)]
mod summary_test;

pub use record::{BenchKey, BenchRecord, SampleSet, Stopwatch};
pub use runner::{RunLog, Runner, warmup};
pub use summary::{Summary, SummaryRow};
