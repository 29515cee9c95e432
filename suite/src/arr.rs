//! Vector workloads: `Vec<i64>` against `im::Vector<i64>`.

use std::hint::black_box;

use anyhow::{Result, ensure};
use pcbench_core::BenchRecord;

use crate::fixtures::{OTHER_OFFSET, persistent_vecs, plain_vecs};
use crate::workload::{Workload, label::*};

pub const CREATE: &[Workload] = &[
    Workload::new("arr_create", PLAIN, plain_create),
    Workload::new("arr_create", PERSISTENT, persistent_create),
];

pub const GRID: &[Workload] = &[
    Workload::new("arr_push", PLAIN_MUTATION, plain_push_by_mutation),
    Workload::new("arr_push", PLAIN_SPREAD, plain_push_by_spread),
    Workload::new("arr_push", PERSISTENT, persistent_push),
    Workload::new("arr_pop", PLAIN_MUTATION, plain_pop_by_mutation),
    Workload::new("arr_pop", PLAIN_SPREAD, plain_pop_by_spread),
    Workload::new("arr_pop", PERSISTENT, persistent_pop),
    Workload::new("arr_slice", PLAIN, plain_slice),
    Workload::new("arr_slice", PERSISTENT, persistent_slice),
    Workload::new("arr_get_existing", PLAIN, plain_get_existing),
    Workload::new("arr_get_existing", PERSISTENT, persistent_get_existing),
    Workload::new("arr_get_non_existing", PLAIN, plain_get_non_existing),
    Workload::new("arr_get_non_existing", PERSISTENT, persistent_get_non_existing),
    Workload::new("arr_set", PLAIN_MUTATION, plain_set_by_mutation),
    Workload::new("arr_set", PLAIN_SPREAD, plain_set_by_spread),
    Workload::new("arr_set", PERSISTENT, persistent_set),
    Workload::new("arr_iter", PLAIN, plain_iter),
    Workload::new("arr_iter", PERSISTENT, persistent_iter),
    Workload::new("arr_equal_true", PLAIN, plain_equal_true),
    Workload::new("arr_equal_true", PERSISTENT, persistent_equal_true),
    Workload::new("arr_equal_false", PLAIN, plain_equal_false),
    Workload::new("arr_equal_false", PERSISTENT, persistent_equal_false),
];

/// `[start, end)` window taken by the slice workloads.
fn slice_window(i: usize, len: usize) -> (usize, usize) {
    let end = len / 2;
    (i.min(end), end)
}

pub fn plain_create(rec: &mut BenchRecord, _size: usize, n: usize) -> Result<()> {
    let arrs = rec.time(|| {
        let mut arrs = Vec::new();
        for i in 0..n {
            arrs.push(vec![i as i64]);
        }
        arrs
    });
    black_box(arrs);
    Ok(())
}

pub fn persistent_create(rec: &mut BenchRecord, _size: usize, n: usize) -> Result<()> {
    let arrs = rec.time(|| {
        let mut arrs = Vec::new();
        for i in 0..n {
            arrs.push(im::Vector::unit(i as i64));
        }
        arrs
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_push_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for (i, arr) in arrs.iter_mut().enumerate() {
            arr.push(i as i64);
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_push_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for i in 0..n {
            let mut next = Vec::with_capacity(arrs[i].len() + 1);
            next.extend_from_slice(&arrs[i]);
            next.push(i as i64);
            arrs[i] = next;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn persistent_push(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = persistent_vecs(size, n, 0);
    rec.time(|| {
        for i in 0..n {
            let mut next = arrs[i].clone();
            next.push_back(i as i64);
            arrs[i] = next;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_pop_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            arr.pop();
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_pop_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            let mut next = arr.clone();
            next.pop();
            *arr = next;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn persistent_pop(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = persistent_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            let mut next = arr.clone();
            next.pop_back();
            *arr = next;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_slice(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for (i, arr) in arrs.iter_mut().enumerate() {
            let (start, end) = slice_window(i, arr.len());
            *arr = arr[start..end].to_vec();
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn persistent_slice(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = persistent_vecs(size, n, 0);
    rec.time(|| {
        for (i, arr) in arrs.iter_mut().enumerate() {
            let (start, end) = slice_window(i, arr.len());
            *arr = arr.take(end).skip(start);
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_get_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = plain_vecs(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| arrs.iter().map(|arr| arr.get(arr.len() / 2).copied()).collect());
    ensure!(vals.iter().all(Option::is_some), "arr_get_existing: missing element");
    Ok(())
}

pub fn persistent_get_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = persistent_vecs(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| arrs.iter().map(|arr| arr.get(arr.len() / 2).copied()).collect());
    ensure!(vals.iter().all(Option::is_some), "arr_get_existing: missing element");
    Ok(())
}

pub fn plain_get_non_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = plain_vecs(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| arrs.iter().map(|arr| arr.get(arr.len() * 2).copied()).collect());
    ensure!(vals.iter().all(Option::is_none), "arr_get_non_existing: found an element");
    Ok(())
}

pub fn persistent_get_non_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = persistent_vecs(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| arrs.iter().map(|arr| arr.get(arr.len() * 2).copied()).collect());
    ensure!(vals.iter().all(Option::is_none), "arr_get_non_existing: found an element");
    Ok(())
}

pub fn plain_set_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            let mid = arr.len() / 2;
            arr[mid] = -1;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_set_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = plain_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            let mut next = arr.clone();
            let mid = next.len() / 2;
            next[mid] = -1;
            *arr = next;
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn persistent_set(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut arrs = persistent_vecs(size, n, 0);
    rec.time(|| {
        for arr in arrs.iter_mut() {
            *arr = arr.update(arr.len() / 2, -1);
        }
    });
    black_box(arrs);
    Ok(())
}

pub fn plain_iter(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = plain_vecs(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| arrs.iter().map(|arr| arr.iter().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn persistent_iter(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = persistent_vecs(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| arrs.iter().map(|arr| arr.iter().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn plain_equal_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = plain_vecs(size, n, 0);
    let copies = plain_vecs(size, n, 0);
    let bools: Vec<bool> = rec.time(|| arrs.iter().zip(&copies).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| b), "arr_equal_true: copies compared unequal");
    Ok(())
}

pub fn plain_equal_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = plain_vecs(size, n, 0);
    let others = plain_vecs(size, n, OTHER_OFFSET);
    let bools: Vec<bool> = rec.time(|| arrs.iter().zip(&others).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| !b), "arr_equal_false: offset sets compared equal");
    Ok(())
}

pub fn persistent_equal_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = persistent_vecs(size, n, 0);
    let copies = persistent_vecs(size, n, 0);
    let bools: Vec<bool> = rec.time(|| arrs.iter().zip(&copies).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| b), "arr_equal_true: copies compared unequal");
    Ok(())
}

pub fn persistent_equal_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let arrs = persistent_vecs(size, n, 0);
    let others = persistent_vecs(size, n, OTHER_OFFSET);
    let bools: Vec<bool> = rec.time(|| arrs.iter().zip(&others).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| !b), "arr_equal_false: offset sets compared equal");
    Ok(())
}
