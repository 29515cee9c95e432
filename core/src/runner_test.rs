#[cfg(test)]
mod tests {
    use std::time::Duration;

    use anyhow::{Result, anyhow, bail};
    use futures::FutureExt;

    use crate::record::BenchRecord;
    use crate::runner::{Runner, warmup};
    use crate::summary::RESULTS_HEADER;

    fn record_one(rec: &mut BenchRecord, _sz: usize, n: usize) -> Result<()> {
        rec.time(|| std::hint::black_box((0..n).sum::<usize>()));
        Ok(())
    }

    #[test]
    fn zero_budget_still_invokes_once() -> Result<()> {
        let mut runner = Runner::new(Duration::ZERO);
        let mut calls = 0;
        runner.bench_sync(
            "sanity_check",
            "--",
            |rec, sz, n| {
                calls += 1;
                record_one(rec, sz, n)
            },
            0,
            10,
        )?;
        assert_eq!(calls, 1);
        let records = runner.log().records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key().to_string(), "sanity_check_0_10");
        assert_eq!(records[0].samples().len(), 1);
        Ok(())
    }

    #[test]
    fn keeps_invoking_until_budget_is_spent() -> Result<()> {
        let budget = Duration::from_millis(5);
        let mut runner = Runner::default();
        let started = std::time::Instant::now();
        runner.bench_sync_with_budget("arr_push", "plain_mutation", record_one, 10, 100, budget)?;
        assert!(started.elapsed() >= budget);
        assert!(!runner.log().records()[0].samples().is_empty());
        Ok(())
    }

    #[test]
    fn records_are_logged_in_completion_order() -> Result<()> {
        let mut runner = Runner::new(Duration::ZERO);
        runner.bench_sync("arr_pop", "_persistent", record_one, 1, 10)?;
        runner.bench_sync("arr_pop", "plain_mutation", record_one, 1, 10)?;
        let descs: Vec<_> = runner.log().records().iter().map(|r| r.desc()).collect();
        assert_eq!(descs, ["_persistent", "plain_mutation"]);
        Ok(())
    }

    #[test]
    fn failing_function_aborts_without_logging() {
        let mut runner = Runner::new(Duration::from_secs(60));
        let err = runner
            .bench_sync("map_merge", "cow_producer", |_, _, _| bail!("assertion failed"), 1, 10)
            .expect_err("error must propagate");
        let msg = format!("{err:#}");
        assert!(msg.contains("map_merge_1_10"), "{msg}");
        assert!(msg.contains("assertion failed"), "{msg}");
        assert!(runner.log().is_empty());
    }

    #[test]
    fn function_without_samples_is_rejected() {
        let mut runner = Runner::new(Duration::ZERO);
        let err = runner
            .bench_sync("arr_iter", "plain", |_, _, _| Ok(()), 1, 10)
            .expect_err("no samples must be an error");
        assert!(err.to_string().contains("recorded no samples"));
    }

    #[test]
    fn log_serialises_header_and_rows() -> Result<()> {
        let mut runner = Runner::new(Duration::ZERO);
        runner.bench_sync(
            "arr_set",
            "plain_spread",
            |rec, _, _| rec.record_micros(2.0),
            10,
            100,
        )?;
        let csv = runner.log().to_csv("rust");
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(RESULTS_HEADER));
        assert_eq!(
            lines.next(),
            Some(r#""arr_set_10_100","rust","plain_spread",1,2.00,2.00,2.00,2.00"#)
        );
        assert_eq!(lines.next(), None);
        Ok(())
    }

    #[test]
    fn write_csv_creates_parent_directories() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("benchmark").join("results_rust.csv");
        let mut runner = Runner::new(Duration::ZERO);
        runner.bench_sync("arr_create", "plain", record_one, 0, 10)?;
        runner.log().write_csv(&path, "rust")?;
        let written = std::fs::read_to_string(&path)?;
        assert!(written.starts_with(RESULTS_HEADER));
        Ok(())
    }

    #[tokio::test]
    async fn async_variant_awaits_each_invocation_in_order() -> Result<()> {
        let mut runner = Runner::new(Duration::from_millis(3));
        let mut order = Vec::new();
        runner
            .bench_async(
                "settle",
                "plain",
                |rec, _, _| {
                    order.push(order.len());
                    async move {
                        let watch = crate::record::Stopwatch::start();
                        tokio::time::sleep(Duration::from_millis(1)).await;
                        rec.record(watch.elapsed());
                        anyhow::Ok(())
                    }
                    .boxed_local()
                },
                0,
                1,
            )
            .await?;
        let record = &runner.log().records()[0];
        assert_eq!(record.samples().len(), order.len());
        assert!(order.windows(2).all(|w| w[0] + 1 == w[1]));
        assert!(record.samples().as_slice().iter().all(|&s| s >= 1000.0));
        Ok(())
    }

    #[tokio::test]
    async fn async_failure_propagates() {
        let mut runner = Runner::new(Duration::from_secs(60));
        let result = runner
            .bench_async_with_budget(
                "settle",
                "plain",
                |_, _, _| {
                    async {
                        let outcome: Result<()> = Err(anyhow!("completion signal lost"));
                        outcome
                    }
                    .boxed_local()
                },
                0,
                1,
                Duration::ZERO,
            )
            .await;
        assert!(result.is_err());
        assert!(runner.log().is_empty());
    }

    #[tokio::test]
    async fn async_budget_defaults_to_runner_and_can_be_overridden() -> Result<()> {
        fn sample<'r>(rec: &'r mut BenchRecord, _: usize, _: usize) -> futures::future::LocalBoxFuture<'r, Result<()>> {
            async move { rec.record_micros(1.0) }.boxed_local()
        }

        let mut runner = Runner::new(Duration::ZERO);
        runner.bench_async("settle", "plain", sample, 0, 1).await?;
        assert_eq!(runner.log().records()[0].samples().len(), 1);

        let mut runner = Runner::new(Duration::from_secs(60));
        runner
            .bench_async_with_budget("settle", "plain", sample, 0, 1, Duration::ZERO)
            .await?;
        assert_eq!(runner.log().records()[0].samples().len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn warmup_pauses_for_requested_duration() {
        let started = std::time::Instant::now();
        warmup(Duration::from_millis(2)).await;
        assert!(started.elapsed() >= Duration::from_millis(2));
        warmup(Duration::ZERO).await;
    }
}
