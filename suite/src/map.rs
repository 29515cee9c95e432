//! Map workloads: `HashMap<i64, i64>` cloned or mutated in place,
//! `im::HashMap<i64, i64>`, and the copy-on-write producer over
//! `Arc<HashMap<i64, i64>>`.

use std::collections::HashMap;
use std::hint::black_box;

use anyhow::{Result, ensure};
use pcbench_core::BenchRecord;

use crate::cow::produce;
use crate::fixtures::{OTHER_OFFSET, force_copy, persistent_maps, plain_maps, shared_maps};
use crate::workload::{Workload, label::*};

pub const CREATE: &[Workload] = &[
    Workload::new("map_create", PLAIN, plain_create),
    Workload::new("map_create", PERSISTENT, persistent_create),
];

pub const GRID: &[Workload] = &[
    Workload::new("map_add_entry", PLAIN_MUTATION, plain_add_entry_by_mutation),
    Workload::new("map_add_entry", PLAIN_SPREAD, plain_add_entry_by_spread),
    Workload::new("map_add_entry", PERSISTENT, persistent_add_entry),
    Workload::new("map_add_entry", COW, cow_add_entry),
    Workload::new("map_add_entry_multiple", PLAIN_MUTATION, plain_add_entries_by_mutation),
    Workload::new("map_add_entry_multiple", PLAIN_SPREAD, plain_add_entries_by_spread),
    Workload::new("map_add_entry_multiple", PERSISTENT, persistent_add_entries),
    Workload::new("map_add_entry_multiple", COW, cow_add_entries),
    Workload::new("map_add_entry_multiple_batched", PLAIN_MUTATION, plain_add_entries_by_mutation),
    Workload::new("map_add_entry_multiple_batched", PLAIN_SPREAD, plain_add_entries_by_spread_batched),
    Workload::new("map_add_entry_multiple_batched", PERSISTENT, persistent_add_entries_batched),
    Workload::new("map_add_entry_multiple_batched", COW, cow_add_entries_batched),
    Workload::new("map_overwrite_entry", PLAIN_MUTATION, plain_overwrite_entry_by_mutation),
    Workload::new("map_overwrite_entry", PLAIN_SPREAD, plain_overwrite_entry_by_spread),
    Workload::new("map_overwrite_entry", PERSISTENT, persistent_overwrite_entry),
    Workload::new("map_overwrite_entry", COW, cow_overwrite_entry),
    Workload::new("map_del_entry", PLAIN_MUTATION, plain_del_entry_by_mutation),
    Workload::new("map_del_entry", PLAIN_SPREAD, plain_del_entry_by_spread),
    Workload::new("map_del_entry", PERSISTENT, persistent_del_entry),
    Workload::new("map_del_entry", COW, cow_del_entry),
    Workload::new("map_merge", PLAIN_MUTATION, plain_merge_by_mutation),
    Workload::new("map_merge", PLAIN_SPREAD, plain_merge_by_spread),
    Workload::new("map_merge", PERSISTENT, persistent_merge),
    Workload::new("map_merge", COW, cow_merge),
    Workload::new("map_has_key_true", PLAIN, plain_has_key_true),
    Workload::new("map_has_key_true", PERSISTENT, persistent_has_key_true),
    Workload::new("map_has_key_false", PLAIN, plain_has_key_false),
    Workload::new("map_has_key_false", PERSISTENT, persistent_has_key_false),
    Workload::new("map_get_existing", PLAIN, plain_get_existing),
    Workload::new("map_get_existing", PERSISTENT, persistent_get_existing),
    Workload::new("map_get_non_existing", PLAIN, plain_get_non_existing),
    Workload::new("map_get_non_existing", PERSISTENT, persistent_get_non_existing),
    Workload::new("map_iter_keys", PLAIN, plain_iter_keys),
    Workload::new("map_iter_keys", PERSISTENT, persistent_iter_keys),
    Workload::new("map_iter_values", PLAIN, plain_iter_values),
    Workload::new("map_iter_values", PERSISTENT, persistent_iter_values),
    Workload::new("map_iter_entries", PLAIN, plain_iter_entries),
    Workload::new("map_iter_entries", PERSISTENT, persistent_iter_entries),
    Workload::new("map_equal_true", PLAIN, plain_equal_true),
    Workload::new("map_equal_true", PERSISTENT, persistent_equal_true),
    Workload::new("map_equal_false", PLAIN, plain_equal_false),
    Workload::new("map_equal_false", PERSISTENT, persistent_equal_false),
];

/// Entries added per map by the `*_multiple` workloads.
const MULTIPLE: i64 = 5;

pub fn plain_create(rec: &mut BenchRecord, _size: usize, n: usize) -> Result<()> {
    let maps = rec.time(|| {
        let mut maps = Vec::new();
        for i in 0..n as i64 {
            maps.push(HashMap::from([(i, i)]));
        }
        maps
    });
    black_box(maps);
    Ok(())
}

pub fn persistent_create(rec: &mut BenchRecord, _size: usize, n: usize) -> Result<()> {
    let maps = rec.time(|| {
        let mut maps = Vec::new();
        for i in 0..n as i64 {
            maps.push(im::HashMap::unit(i, i));
        }
        maps
    });
    black_box(maps);
    Ok(())
}

pub fn plain_add_entry_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            map.insert(i + 1, i + 1);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_add_entry_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            let mut next = map.clone();
            next.insert(i + 1, i + 1);
            *map = next;
        }
    });
    black_box(maps);
    Ok(())
}

pub fn persistent_add_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = persistent_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = map.update(i + 1, i + 1);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn cow_add_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = shared_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = produce(map, |draft| {
                draft.insert(i + 1, i + 1);
            });
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_add_entries_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            for k in i + 1..=i + MULTIPLE {
                map.insert(k, k);
            }
        }
    });
    black_box(maps);
    Ok(())
}

/// One full copy per added entry.
pub fn plain_add_entries_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            for k in i + 1..=i + MULTIPLE {
                let mut next = map.clone();
                next.insert(k, k);
                *map = next;
            }
        }
    });
    black_box(maps);
    Ok(())
}

pub fn persistent_add_entries(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = persistent_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            for k in i + 1..=i + MULTIPLE {
                *map = map.update(k, k);
            }
        }
    });
    black_box(maps);
    Ok(())
}

pub fn cow_add_entries(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = shared_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            for k in i + 1..=i + MULTIPLE {
                *map = produce(map, |draft| {
                    draft.insert(k, k);
                });
            }
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_add_entries_by_spread_batched(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            let mut next = map.clone();
            next.extend((i + 1..=i + MULTIPLE).map(|k| (k, k)));
            *map = next;
        }
    });
    black_box(maps);
    Ok(())
}

/// Batches the inserts on a single transient copy.
pub fn persistent_add_entries_batched(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = persistent_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            let mut next = map.clone();
            for k in i + 1..=i + MULTIPLE {
                next.insert(k, k);
            }
            *map = next;
        }
    });
    black_box(maps);
    Ok(())
}

pub fn cow_add_entries_batched(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = shared_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = produce(map, |draft| {
                for k in i + 1..=i + MULTIPLE {
                    draft.insert(k, k);
                }
            });
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_overwrite_entry_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            map.insert(i, i + 1);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_overwrite_entry_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            let mut next = map.clone();
            next.insert(i, i + 1);
            *map = next;
        }
    });
    black_box(maps);
    Ok(())
}

pub fn persistent_overwrite_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = persistent_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = map.update(i, i + 1);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn cow_overwrite_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = shared_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = produce(map, |draft| {
                draft.insert(i, i + 1);
            });
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_del_entry_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            map.remove(&i);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn plain_del_entry_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = plain_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            let mut next = map.clone();
            next.remove(&i);
            *map = next;
        }
    });
    black_box(maps);
    Ok(())
}

pub fn persistent_del_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = persistent_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = map.without(&i);
        }
    });
    black_box(maps);
    Ok(())
}

pub fn cow_del_entry(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut maps = shared_maps(size, n, 0);
    rec.time(|| {
        for (i, map) in (0i64..).zip(maps.iter_mut()) {
            *map = produce(map, |draft| {
                draft.remove(&i);
            });
        }
    });
    black_box(maps);
    Ok(())
}

/// Merges into the left map in place and keeps it as the result.
pub fn plain_merge_by_mutation(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let mut lefts = plain_maps(size, n, 0);
    let rights = plain_maps(size, n, OTHER_OFFSET);
    let merged: Vec<HashMap<i64, i64>> = rec.time(|| {
        lefts
            .iter_mut()
            .zip(&rights)
            .map(|(left, right)| {
                left.extend(right.iter().map(|(&k, &v)| (k, v)));
                std::mem::take(left)
            })
            .collect()
    });
    black_box(merged);
    Ok(())
}

pub fn plain_merge_by_spread(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let lefts = plain_maps(size, n, 0);
    let rights = plain_maps(size, n, OTHER_OFFSET);
    let merged: Vec<HashMap<i64, i64>> = rec.time(|| {
        lefts
            .iter()
            .zip(&rights)
            .map(|(left, right)| {
                let mut next = left.clone();
                next.extend(right.iter().map(|(&k, &v)| (k, v)));
                next
            })
            .collect()
    });
    black_box(merged);
    Ok(())
}

/// Right-hand values win, as with the other strategies.
pub fn persistent_merge(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let lefts = persistent_maps(size, n, 0);
    let rights = persistent_maps(size, n, OTHER_OFFSET);
    let merged: Vec<im::HashMap<i64, i64>> = rec.time(|| {
        lefts
            .iter()
            .zip(&rights)
            .map(|(left, right)| right.clone().union(left.clone()))
            .collect()
    });
    black_box(merged);
    Ok(())
}

pub fn cow_merge(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let lefts = shared_maps(size, n, 0);
    let rights = shared_maps(size, n, OTHER_OFFSET);
    let merged: Vec<_> = rec.time(|| {
        lefts
            .iter()
            .zip(&rights)
            .map(|(left, right)| produce(left, |draft| draft.extend(right.iter().map(|(&k, &v)| (k, v)))))
            .collect()
    });
    black_box(merged);
    Ok(())
}

pub fn plain_has_key_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let bools: Vec<bool> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.contains_key(&i)).collect());
    ensure!(bools.iter().all(|&b| b), "map_has_key_true: key missing");
    Ok(())
}

pub fn plain_has_key_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let bools: Vec<bool> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.contains_key(&(i + 1))).collect());
    ensure!(bools.iter().all(|&b| !b), "map_has_key_false: unexpected key");
    Ok(())
}

pub fn persistent_has_key_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let bools: Vec<bool> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.contains_key(&i)).collect());
    ensure!(bools.iter().all(|&b| b), "map_has_key_true: key missing");
    Ok(())
}

pub fn persistent_has_key_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let bools: Vec<bool> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.contains_key(&(i + 1))).collect());
    ensure!(bools.iter().all(|&b| !b), "map_has_key_false: unexpected key");
    Ok(())
}

pub fn plain_get_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.get(&i).copied()).collect());
    ensure!(vals.iter().all(Option::is_some), "map_get_existing: key missing");
    Ok(())
}

pub fn plain_get_non_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.get(&(i + 1)).copied()).collect());
    ensure!(vals.iter().all(Option::is_none), "map_get_non_existing: unexpected key");
    Ok(())
}

pub fn persistent_get_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.get(&i).copied()).collect());
    ensure!(vals.iter().all(Option::is_some), "map_get_existing: key missing");
    Ok(())
}

pub fn persistent_get_non_existing(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let vals: Vec<Option<i64>> = rec.time(|| (0i64..).zip(&maps).map(|(i, m)| m.get(&(i + 1)).copied()).collect());
    ensure!(vals.iter().all(Option::is_none), "map_get_non_existing: unexpected key");
    Ok(())
}

pub fn plain_iter_keys(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| maps.iter().map(|m| m.keys().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn plain_iter_values(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| maps.iter().map(|m| m.values().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn plain_iter_entries(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let iters: Vec<Vec<(i64, i64)>> =
        rec.time(|| maps.iter().map(|m| m.iter().map(|(&k, &v)| (k, v)).collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn persistent_iter_keys(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| maps.iter().map(|m| m.keys().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn persistent_iter_values(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let iters: Vec<Vec<i64>> = rec.time(|| maps.iter().map(|m| m.values().copied().collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn persistent_iter_entries(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let iters: Vec<Vec<(i64, i64)>> =
        rec.time(|| maps.iter().map(|m| m.iter().map(|(&k, &v)| (k, v)).collect()).collect());
    black_box(iters);
    Ok(())
}

pub fn plain_equal_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let copies = maps.clone();
    let bools: Vec<bool> = rec.time(|| maps.iter().zip(&copies).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| b), "map_equal_true: copies compared unequal");
    Ok(())
}

pub fn plain_equal_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = plain_maps(size, n, 0);
    let others = plain_maps(size, n, OTHER_OFFSET);
    let bools: Vec<bool> = rec.time(|| maps.iter().zip(&others).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| !b), "map_equal_false: offset sets compared equal");
    Ok(())
}

/// Compares against structurally distinct copies so equality cannot short-circuit on sharing.
pub fn persistent_equal_true(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let copies: Vec<_> = maps.iter().map(force_copy).collect();
    let bools: Vec<bool> = rec.time(|| maps.iter().zip(&copies).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| b), "map_equal_true: copies compared unequal");
    Ok(())
}

pub fn persistent_equal_false(rec: &mut BenchRecord, size: usize, n: usize) -> Result<()> {
    let maps = persistent_maps(size, n, 0);
    let others = persistent_maps(size, n, OTHER_OFFSET);
    let bools: Vec<bool> = rec.time(|| maps.iter().zip(&others).map(|(a, b)| a == b).collect());
    ensure!(bools.iter().all(|&b| !b), "map_equal_false: offset sets compared equal");
    Ok(())
}
