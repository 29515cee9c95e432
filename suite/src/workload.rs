use anyhow::Result;
use pcbench_core::BenchRecord;

/// Strategy labels written to the `desc` column.
pub mod label {
    pub const PLAIN: &str = "plain";
    pub const PLAIN_MUTATION: &str = "plain_mutation";
    pub const PLAIN_SPREAD: &str = "plain_spread";
    /// Leading `_` sorts it first, making it the default baseline of its group.
    pub const PERSISTENT: &str = "_persistent";
    pub const COW: &str = "cow_producer";
    pub const SANITY: &str = "--";
}

/// Function under test: `(record, size, iterations)`.
pub type WorkloadFn = fn(&mut BenchRecord, usize, usize) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct Workload {
    pub operation: &'static str,
    pub desc: &'static str,
    pub run: WorkloadFn,
}

impl Workload {
    pub const fn new(operation: &'static str, desc: &'static str, run: WorkloadFn) -> Self {
        Self { operation, desc, run }
    }
}
