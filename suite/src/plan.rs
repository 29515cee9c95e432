//! Scenario plan: which workloads run at which sizes and iteration counts.

use std::hint::black_box;
use std::time::Duration;

use anyhow::{Result, bail};
use pcbench_core::{BenchRecord, Runner, warmup};
use tracing::info;

use crate::workload::{Workload, label};
use crate::{arr, map};

pub const SANITY_ITERATIONS: [usize; 3] = [5_000_000, 50_000, 500];
pub const GRID_ITERATIONS: [usize; 3] = [10, 100, 1000];
pub const GRID_SIZES: [usize; 4] = [1, 10, 100, 1000];

pub const SANITY: Workload = Workload::new("sanity_check", label::SANITY, sanity_check);

/// Calibration loop with no container work at all.
pub fn sanity_check(rec: &mut BenchRecord, _size: usize, n: usize) -> Result<()> {
    let sum = rec.time(|| {
        let mut s = 0.0f64;
        for f in 0..n {
            s += black_box(f as f64);
        }
        s
    });
    black_box(sum);
    Ok(())
}

/// Whether the `(iterations, size)` cell is part of the grid.
pub fn in_grid(iterations: usize, size: usize) -> bool {
    let skip = (iterations < 100 && size < 100)
        || (iterations > 100 && size >= 100)
        || (iterations >= 100 && size > 100);
    !skip
}

/// Budget a scenario runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Budget {
    /// The runner's own budget.
    Standard,
    /// The short per-entry budget of the container grid.
    Grid,
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub workload: Workload,
    pub size: usize,
    pub iterations: usize,
    pub budget: Budget,
}

/// Every operation name the plan knows about.
pub fn operations() -> Vec<&'static str> {
    let mut ops = vec![SANITY.operation];
    for w in arr::CREATE.iter().chain(map::CREATE).chain(arr::GRID).chain(map::GRID) {
        if !ops.contains(&w.operation) {
            ops.push(w.operation);
        }
    }
    ops
}

/// Builds the run order, keeping only operations named in `filter` when it is non-empty.
pub fn build_plan(filter: &[String]) -> Result<Vec<Scenario>> {
    let known = operations();
    if let Some(unknown) = filter.iter().find(|op| !known.contains(&op.as_str())) {
        bail!("unknown operation `{unknown}`; known operations: {}", known.join(", "));
    }
    let wanted = |w: &Workload| filter.is_empty() || filter.iter().any(|op| op == w.operation);

    let mut plan = Vec::new();
    if wanted(&SANITY) {
        for iterations in SANITY_ITERATIONS {
            plan.push(Scenario {
                workload: SANITY,
                size: 0,
                iterations,
                budget: Budget::Standard,
            });
        }
    }

    for iterations in GRID_ITERATIONS {
        for &workload in arr::CREATE.iter().chain(map::CREATE).filter(|w| wanted(*w)) {
            plan.push(Scenario {
                workload,
                size: 0,
                iterations,
                budget: Budget::Grid,
            });
        }
        for size in GRID_SIZES.into_iter().filter(|&sz| in_grid(iterations, sz)) {
            for &workload in arr::GRID.iter().chain(map::GRID).filter(|w| wanted(*w)) {
                plan.push(Scenario {
                    workload,
                    size,
                    iterations,
                    budget: Budget::Grid,
                });
            }
        }
    }
    Ok(plan)
}

#[derive(Debug, Clone, Copy)]
pub struct SuiteSettings {
    pub grid_budget: Duration,
    pub warmup: Duration,
}

/// Warms up, then runs every scenario in order on `runner`.
pub async fn run_suite(runner: &mut Runner, plan: &[Scenario], settings: &SuiteSettings) -> Result<()> {
    info!(scenarios = plan.len(), "starting benchmark suite");
    warmup(settings.warmup).await;
    for scenario in plan {
        let Workload { operation, desc, run } = scenario.workload;
        let budget = match scenario.budget {
            Budget::Standard => runner.budget(),
            Budget::Grid => settings.grid_budget,
        };
        runner.bench_sync_with_budget(operation, desc, run, scenario.size, scenario.iterations, budget)?;
    }
    Ok(())
}
