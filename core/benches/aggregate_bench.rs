use criterion::{Criterion, criterion_group, criterion_main};
use pcbench_core::Summary;
use pcbench_core::report::parse::{ResultRow, parse_results};
use pcbench_core::report::{build_tables, render};
use pcbench_core::summary::RESULTS_HEADER;
use std::hint::black_box;

const DESCS: [&str; 4] = ["_persistent", "cow_producer", "plain_mutation", "plain_spread"];

fn synthetic_rows(groups: usize) -> Vec<ResultRow> {
    let mut rows = Vec::with_capacity(groups * DESCS.len());
    for g in 0..groups {
        for (d, desc) in DESCS.iter().enumerate() {
            let base = 1.0 + (g * 7 + d * 3) as f64;
            rows.push(ResultRow {
                key: format!("map_op{}_{}_{}", g % 13, g % 4, g),
                sys: "rust".to_string(),
                desc: desc.to_string(),
                runs: 100 + d as u64,
                minimum: base,
                maximum: base * 4.0,
                mean: base * 2.0,
                median: base * 1.5,
            });
        }
    }
    rows
}

fn summary_bench(c: &mut Criterion) {
    let samples: Vec<f64> = (0..10_000).map(|i| ((i * 7919) % 1000) as f64 / 10.0).collect();
    c.bench_function("summary_from_10k_samples", |b| {
        b.iter(|| black_box(Summary::from_samples(black_box(&samples))))
    });
}

fn report_bench(c: &mut Criterion) {
    let rows = synthetic_rows(200);

    c.bench_function("build_tables_800_rows", |b| {
        b.iter(|| black_box(build_tables(black_box(rows.clone()), Some("plain_mutation"))))
    });

    let tables = build_tables(rows.clone(), None);
    c.bench_function("render_console_and_csv", |b| {
        b.iter(|| {
            black_box(render::console_table(&tables));
            black_box(render::full_csv(&tables));
        })
    });

    let mut doc = String::from(RESULTS_HEADER);
    for row in &rows {
        doc.push_str(&format!(
            "\n\"{}\",\"{}\",\"{}\",{},{:.2},{:.2},{:.2},{:.2}",
            row.key, row.sys, row.desc, row.runs, row.minimum, row.maximum, row.mean, row.median
        ));
    }
    c.bench_function("parse_results_800_rows", |b| {
        b.iter(|| black_box(parse_results(black_box(&doc)).unwrap()))
    });
}

criterion_group!(benches, summary_bench, report_bench);
criterion_main!(benches);
