use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Once;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use pcbench_core::Runner;
use pcbench_core::cleanup::remove_csv_files;
use pcbench_core::config::{BenchConfig, Config, DEFAULT_CONFIG_FILE, ReportConfig};
use pcbench_core::report::{ReportOutcome, run_report};
use pcbench_suite::{SuiteSettings, build_plan, run_suite};
use tracing::info;


static TRACE_INIT: Once = Once::new();
const TRACE_ENV: &str = "PCBENCH_LOG";
const DEFAULT_TRACE_FILTER: &str = "pcbench_core=info,pcbench_suite=info,pcbench_cli=info";

#[derive(Debug, Parser)]
#[command(
    name = "pcbench",
    version,
    about = "Benchmark plain, persistent and copy-on-write containers",
    long_about = None
)]
struct CliArgs {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the container suite and write a results CSV.
    Bench(BenchArgs),
    /// Merge every results CSV under a directory into one comparison report.
    Report(ReportArgs),
    /// Delete every `.csv` file under a directory.
    Cleanup(CleanupArgs),
}

#[derive(Debug, Args)]
struct BenchArgs {
    /// Configuration file (defaults to `pcbench.toml` when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Results CSV to write
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Budget for standalone benchmarks, in microseconds
    #[arg(long, value_name = "N")]
    budget_us: Option<u64>,
    /// Budget for each container grid entry, in microseconds
    #[arg(long, value_name = "N")]
    grid_budget_us: Option<u64>,
    #[arg(long, value_name = "N")]
    warmup_us: Option<u64>,
    /// Label written to the `sys` column
    #[arg(long, value_name = "S")]
    system: Option<String>,
    /// Only run these operations (repeatable)
    #[arg(long = "filter", value_name = "OP")]
    filters: Vec<String>,
}

impl BenchArgs {
    fn apply(&self, config: &mut BenchConfig) {
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(us) = self.budget_us {
            config.budget_us = us;
        }
        if let Some(us) = self.grid_budget_us {
            config.grid_budget_us = us;
        }
        if let Some(us) = self.warmup_us {
            config.warmup_us = us;
        }
        if let Some(system) = &self.system {
            config.system = system.clone();
        }
    }
}

#[derive(Debug, Args)]
struct ReportArgs {
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory scanned recursively for results CSVs
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
    /// Combined report CSV to write
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Strategy label used as every group's baseline when present
    #[arg(long, value_name = "LABEL")]
    baseline: Option<String>,
    /// Skip the console table
    #[arg(long)]
    no_console: bool,
    /// Skip writing the combined CSV
    #[arg(long)]
    no_csv: bool,
}

impl ReportArgs {
    fn apply(&self, config: &mut ReportConfig) {
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(baseline) = &self.baseline {
            config.baseline = Some(baseline.clone());
        }
        if self.no_console {
            config.print_console = false;
        }
        if self.no_csv {
            config.write_csv = false;
        }
    }
}

#[derive(Debug, Args)]
struct CleanupArgs {
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Directory to clean (defaults to the report root)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

fn filter_expr_from(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

fn init_tracing() {
    TRACE_INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;
        use tracing_subscriber::fmt;

        let filter_expr = std::env::var(TRACE_ENV)
            .ok()
            .and_then(|raw| filter_expr_from(&raw))
            .or_else(|| std::env::var("RUST_LOG").ok().and_then(|raw| filter_expr_from(&raw)));

        let builder = fmt().with_writer(std::io::stderr);

        let builder = match filter_expr.and_then(|expr| EnvFilter::try_new(expr).ok()) {
            Some(filter) => builder.with_env_filter(filter),
            None => builder.with_env_filter(DEFAULT_TRACE_FILTER),
        };

        let _ = builder.try_init();
    });
}

/// An explicit `--config` must exist; the default file is optional.
fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::load(path, true),
        None => Config::load(Path::new(DEFAULT_CONFIG_FILE), false),
    }
}

async fn bench(args: BenchArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?.bench;
    args.apply(&mut config);

    let plan = build_plan(&args.filters)?;
    let mut runner = Runner::new(config.budget());
    let settings = SuiteSettings {
        grid_budget: config.grid_budget(),
        warmup: config.warmup(),
    };
    run_suite(&mut runner, &plan, &settings).await?;

    let log = runner.into_log();
    log.write_csv(&config.output, &config.system)?;
    println!("Wrote {} results to {}", log.len(), config.output.display());
    Ok(())
}

async fn report(args: ReportArgs) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_deref())?.report;
    args.apply(&mut config);

    let mut stdout = std::io::stdout().lock();
    let outcome = run_report(&config, &mut stdout).await?;
    stdout.flush().context("flush stdout")?;
    if let ReportOutcome::Generated { files, rows, groups } = outcome {
        info!(files, rows, groups, "report complete");
    }
    Ok(())
}

fn cleanup(args: CleanupArgs) -> anyhow::Result<()> {
    let root = match args.root {
        Some(root) => root,
        None => load_config(args.config.as_deref())?.report.root,
    };
    let removed = remove_csv_files(&root)?;
    println!("Deleted {} CSV file(s) under {}", removed.len(), root.display());
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let CliArgs { command } = CliArgs::parse();
    match command {
        Commands::Bench(args) => bench(args).await,
        Commands::Report(args) => report(args).await,
        Commands::Cleanup(args) => cleanup(args),
    }
}
