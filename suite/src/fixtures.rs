//! Deterministic container fixtures.
//!
//! Fixture `i` of a set holds the keys `i + offset` and `i + offset + 17 * j`
//! for `j` in `1..size`, so two sets built with different offsets never
//! compare equal. Maps store each key as its own value.

use std::collections::HashMap;
use std::sync::Arc;

pub const KEY_STRIDE: i64 = 17;
/// Offset of the second set in equality and merge workloads.
pub const OTHER_OFFSET: usize = 3;

/// Keys of fixture `index`; never empty, even for `size == 0`.
pub fn fixture_keys(index: usize, size: usize, offset: usize) -> impl Iterator<Item = i64> {
    let base = (index + offset) as i64;
    std::iter::once(base).chain((1..size as i64).map(move |j| base + j * KEY_STRIDE))
}

pub fn plain_vecs(size: usize, n: usize, offset: usize) -> Vec<Vec<i64>> {
    (0..n).map(|i| fixture_keys(i, size, offset).collect()).collect()
}

pub fn persistent_vecs(size: usize, n: usize, offset: usize) -> Vec<im::Vector<i64>> {
    (0..n)
        .map(|i| {
            let mut v = im::Vector::new();
            for k in fixture_keys(i, size, offset) {
                v.push_back(k);
            }
            v
        })
        .collect()
}

pub fn plain_maps(size: usize, n: usize, offset: usize) -> Vec<HashMap<i64, i64>> {
    (0..n)
        .map(|i| fixture_keys(i, size, offset).map(|k| (k, k)).collect())
        .collect()
}

pub fn persistent_maps(size: usize, n: usize, offset: usize) -> Vec<im::HashMap<i64, i64>> {
    (0..n)
        .map(|i| {
            fixture_keys(i, size, offset).fold(im::HashMap::new(), |map, k| map.update(k, k))
        })
        .collect()
}

pub fn shared_maps(size: usize, n: usize, offset: usize) -> Vec<Arc<HashMap<i64, i64>>> {
    plain_maps(size, n, offset).into_iter().map(Arc::new).collect()
}

/// Structurally distinct copy of `map` with equal contents.
pub fn force_copy(map: &im::HashMap<i64, i64>) -> im::HashMap<i64, i64> {
    map.update(-1, -1).without(&-1)
}
