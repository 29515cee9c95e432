use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Deref;
use std::sync::Arc;

/// Copy-on-write view over a shared value.
///
/// Reads go to the original until the first write, which clones it once into
/// a private scratch copy. Later writes reuse that copy.
pub struct Draft<'a, T: Clone> {
    original: &'a Arc<T>,
    scratch: Option<T>,
}

impl<'a, T: Clone> Draft<'a, T> {
    pub fn new(original: &'a Arc<T>) -> Self {
        Self {
            original,
            scratch: None,
        }
    }

    /// Returns true if no write has been requested.
    pub fn pristine(&self) -> bool {
        self.scratch.is_none()
    }

    /// Mutable access, cloning the original on first use.
    pub fn to_mut(&mut self) -> &mut T {
        self.scratch.get_or_insert_with(|| T::clone(self.original.as_ref()))
    }

    /// Finalises the draft: the original `Arc` when untouched, a new one otherwise.
    pub fn finish(self) -> Arc<T> {
        match self.scratch {
            Some(value) => Arc::new(value),
            None => Arc::clone(self.original),
        }
    }
}

impl<T: Clone> Deref for Draft<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match &self.scratch {
            Some(value) => value,
            None => self.original.as_ref(),
        }
    }
}

impl<K, V> Draft<'_, HashMap<K, V>>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Inserts or replaces `key`, returning the previous value.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.to_mut().insert(key, value)
    }

    /// Removes `key`. A missing key leaves the draft pristine.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        if !self.contains_key(key) {
            return None;
        }
        self.to_mut().remove(key)
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.to_mut().extend(entries);
    }
}

/// Runs `recipe` against a draft of `base` and returns the resulting value.
///
/// A recipe that never writes yields `base` itself (pointer-equal).
pub fn produce<T, F>(base: &Arc<T>, recipe: F) -> Arc<T>
where
    T: Clone,
    F: FnOnce(&mut Draft<'_, T>),
{
    let mut draft = Draft::new(base);
    recipe(&mut draft);
    draft.finish()
}
