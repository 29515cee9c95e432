use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::error::Error;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

const HEADER: &str = r#""key","sys","desc","runs","minimum","maximum","mean","median""#;

fn pcbench() -> Result<Command, Box<dyn Error>> {
    let mut cmd = Command::cargo_bin("pcbench")?;
    cmd.env_remove("PCBENCH_LOG").env_remove("RUST_LOG");
    Ok(cmd)
}

#[test]
fn report_merges_and_ranks_against_baseline() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let root = dir.path().join("benchmark");
    fs::create_dir_all(root.join("js"))?;
    fs::write(
        root.join("js/results_js.csv"),
        format!("{HEADER}\n\"map_add_entry_1_10\",\"js\",\"_immutable.js\",5,10.00,20.00,15.00,15.00"),
    )?;
    fs::write(
        root.join("results_rust.csv"),
        format!("{HEADER}\n\"map_add_entry_1_10\",\"rust\",\"plain_mutation\",5,1.00,2.00,1.50,1.50"),
    )?;
    let output = dir.path().join("benchmarks.csv");

    let mut cmd = pcbench()?;
    cmd.current_dir(dir.path())
        .args(["report", "--root", "benchmark", "--output", "benchmarks.csv"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("min_m"))
        .stdout(predicate::str::contains("_immutable.js"));

    let combined = fs::read_to_string(&output)?;
    let lines: Vec<_> = combined.lines().collect();
    assert_eq!(lines[0], "key,sys,desc,runs,run_m,minimum,min_m,maximum,max_m,mean,mean_m,median,med_m");
    assert!(lines[1].starts_with("map_add_entry_1_10,js,_immutable.js,5,1.00"));
    assert!(lines[2].contains(",1.00,0.10,2.00,0.10,"));

    let mut cmd = pcbench()?;
    cmd.current_dir(dir.path()).args([
        "report",
        "--root",
        "benchmark",
        "--output",
        "benchmarks.csv",
        "--baseline",
        "plain_mutation",
        "--no-console",
    ]);
    cmd.assert().success().stdout(predicate::str::is_empty());
    let combined = fs::read_to_string(&output)?;
    let lines: Vec<_> = combined.lines().collect();
    assert!(lines[1].starts_with("map_add_entry_1_10,rust,plain_mutation"));
    assert!(lines[2].contains(",10.00,10.00,20.00,10.00,"));

    Ok(())
}

#[test]
fn report_without_input_prints_notice_and_succeeds() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("benchmarks.csv");

    let mut cmd = pcbench()?;
    cmd.args(["report", "--root"])
        .arg(dir.path())
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("No CSV files found in the directory."));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn report_fails_on_malformed_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::write(dir.path().join("broken.csv"), "key,sys\n\"k\",\"rust\"\n")?;
    let output = dir.path().join("out.txt");

    let mut cmd = pcbench()?;
    cmd.args(["report", "--root"])
        .arg(dir.path())
        .arg("--output")
        .arg(&output);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("broken.csv"))
        .stderr(predicate::str::contains("missing column"));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn cleanup_removes_only_csv_files() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("a/b"))?;
    fs::write(dir.path().join("one.csv"), "x")?;
    fs::write(dir.path().join("a/b/two.csv"), "x")?;
    fs::write(dir.path().join("a/keep.md"), "x")?;

    let mut cmd = pcbench()?;
    cmd.args(["cleanup", "--root"]).arg(dir.path());
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Deleted 2 CSV file(s)"));

    assert!(!dir.path().join("one.csv").exists());
    assert!(!dir.path().join("a/b/two.csv").exists());
    assert!(dir.path().join("a/keep.md").exists());
    Ok(())
}

#[test]
fn bench_writes_results_for_filtered_operations() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let output = dir.path().join("benchmark/results_rust.csv");

    let mut cmd = pcbench()?;
    cmd.current_dir(dir.path()).args([
        "bench",
        "--filter",
        "arr_create",
        "--filter",
        "map_has_key_true",
        "--budget-us",
        "0",
        "--grid-budget-us",
        "0",
        "--warmup-us",
        "0",
        "--output",
        "benchmark/results_rust.csv",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Wrote 20 results"));

    let written = fs::read_to_string(&output)?;
    let mut lines = written.lines();
    assert_eq!(lines.next(), Some(HEADER));
    let rows: Vec<_> = lines.collect();
    assert_eq!(rows.len(), 20);
    assert!(rows[0].starts_with(r#""arr_create_0_10","rust","plain",1,"#));
    assert!(rows.iter().any(|r| r.contains(r#""map_has_key_true_100_10","rust","_persistent""#)));
    Ok(())
}

#[test]
fn bench_rejects_unknown_operation() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let mut cmd = pcbench()?;
    cmd.current_dir(dir.path()).args(["bench", "--filter", "arr_sort", "--warmup-us", "0"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown operation `arr_sort`"));
    Ok(())
}
