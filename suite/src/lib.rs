pub mod arr;
pub mod cow;
pub mod fixtures;
pub mod map;
pub mod plan;
pub mod workload;


pub use cow::{Draft, produce};
pub use plan::{Budget, Scenario, SuiteSettings, build_plan, run_suite};
pub use workload::{Workload, WorkloadFn};
