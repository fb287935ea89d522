use std::cell::Cell;
use std::collections::HashMap;

use crate::core::types::TargetValue;

/// Formatted answers keyed by target value, scoped to one engine run.
///
/// The first answer stored for a target wins; later inserts are ignored.
#[derive(Debug, Default)]
pub struct ResultCache {
    answers: HashMap<TargetValue, String>,
    hits: Cell<usize>,
    misses: Cell<usize>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            answers: HashMap::with_capacity(capacity),
            ..Self::default()
        }
    }

    /// Look up a cached answer, counting the hit or miss
    pub fn get(&self, target: TargetValue) -> Option<&str> {
        let found = self.answers.get(&target).map(String::as_str);
        if found.is_some() {
            self.hits.set(self.hits.get() + 1);
        } else {
            self.misses.set(self.misses.get() + 1);
        }
        found
    }

    /// Store an answer unless one exists. Returns true if it was stored.
    pub fn insert(&mut self, target: TargetValue, answer: String) -> bool {
        if self.answers.contains_key(&target) {
            return false;
        }
        self.answers.insert(target, answer);
        true
    }

    /// Return the cached answer, computing and storing it on first sight
    pub fn get_or_insert_with<F>(&mut self, target: TargetValue, compute: F) -> &str
    where
        F: FnOnce() -> String,
    {
        if self.answers.contains_key(&target) {
            self.hits.set(self.hits.get() + 1);
        } else {
            self.misses.set(self.misses.get() + 1);
        }
        self.answers.entry(target).or_insert_with(compute)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits.get()
    }

    pub fn misses(&self) -> usize {
        self.misses.get()
    }
}
