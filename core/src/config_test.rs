#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use anyhow::Result;

    use crate::config::{BenchConfig, Config, ReportConfig};

    #[test]
    fn defaults_match_the_documented_values() {
        let config = Config::default();
        assert_eq!(config.bench.budget(), Duration::from_millis(100));
        assert_eq!(config.bench.grid_budget(), Duration::from_micros(2));
        assert_eq!(config.bench.warmup(), Duration::from_millis(100));
        assert_eq!(config.bench.system, "rust");
        assert_eq!(config.bench.output, PathBuf::from("benchmark/results_rust.csv"));
        assert_eq!(config.report.root, PathBuf::from("benchmark"));
        assert_eq!(config.report.output, PathBuf::from("benchmarks.csv"));
        assert_eq!(config.report.baseline, None);
        assert!(config.report.print_console && config.report.write_csv);
    }

    #[test]
    fn empty_document_is_the_default_config() -> Result<()> {
        assert_eq!(Config::from_toml_str("")?, Config::default());
        Ok(())
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() -> Result<()> {
        let config = Config::from_toml_str(
            r#"
[bench]
grid_budget_us = 500
system = "rust-release"

[report]
baseline = "plain_mutation"
print_console = false
"#,
        )?;
        assert_eq!(
            config.bench,
            BenchConfig {
                grid_budget_us: 500,
                system: "rust-release".to_string(),
                ..BenchConfig::default()
            }
        );
        assert_eq!(
            config.report,
            ReportConfig {
                baseline: Some("plain_mutation".to_string()),
                print_console: false,
                ..ReportConfig::default()
            }
        );
        Ok(())
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_toml_str("[bench]\nbudget = 1\n").is_err());
        assert!(Config::from_toml_str("[plots]\nenabled = true\n").is_err());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(Config::from_toml_str("[bench]\nbudget_us = \"fast\"\n").is_err());
    }

    #[test]
    fn missing_optional_file_falls_back_to_defaults() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let config = Config::load(&dir.path().join("pcbench.toml"), false)?;
        assert_eq!(config, Config::default());
        Ok(())
    }

    #[test]
    fn missing_required_file_is_an_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("custom.toml");
        let err = Config::load(&path, true).expect_err("required config must exist");
        assert!(format!("{err:#}").contains("custom.toml"));
        Ok(())
    }

    #[test]
    fn load_reads_file_and_names_it_on_parse_failure() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let good = dir.path().join("good.toml");
        std::fs::write(&good, "[report]\nroot = \"results\"\n")?;
        assert_eq!(Config::load(&good, true)?.report.root, PathBuf::from("results"));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "[report\n")?;
        let err = Config::load(&bad, false).expect_err("malformed config");
        assert!(format!("{err:#}").contains("bad.toml"));
        Ok(())
    }
}
