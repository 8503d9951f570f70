//! Sort and filter transforms applied to response collections before
//! rendering.
//!
//! Commands own a registry of named comparison and predicate functions
//! for their item type; user-supplied `--sort` / `--filter` specs select
//! from those registries. Applying a transform always sorts first, then
//! filters.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::OutputError;

/// A named comparison function over `T`.
pub type CmpFn<T> = fn(&T, &T) -> Ordering;

/// A named predicate over `T`, matching against a user-supplied value.
pub type PredFn<T> = fn(&T, &str) -> bool;

/// Registry of comparison functions a command supports for `--sort`.
#[derive(Debug)]
pub struct Sorters<T> {
    by_key: HashMap<&'static str, CmpFn<T>>,
}

impl<T> Default for Sorters<T> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<T> Sorters<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a comparison function under `key`.
    #[must_use]
    pub fn with(mut self, key: &'static str, cmp: CmpFn<T>) -> Self {
        self.by_key.insert(key, cmp);
        self
    }

    fn get(&self, key: &str) -> Option<CmpFn<T>> {
        self.by_key.get(key).copied()
    }
}

/// Registry of predicate functions a command supports for `--filter`.
#[derive(Debug)]
pub struct Filters<T> {
    by_key: HashMap<&'static str, PredFn<T>>,
}

impl<T> Default for Filters<T> {
    fn default() -> Self {
        Self {
            by_key: HashMap::new(),
        }
    }
}

impl<T> Filters<T> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a predicate under `key`.
    #[must_use]
    pub fn with(mut self, key: &'static str, pred: PredFn<T>) -> Self {
        self.by_key.insert(key, pred);
        self
    }

    fn get(&self, key: &str) -> Option<PredFn<T>> {
        self.by_key.get(key).copied()
    }
}

/// The sort-then-filter pipeline for one homogeneous collection.
pub struct Transform<T> {
    cmps: Vec<CmpFn<T>>,
    preds: Vec<(PredFn<T>, String)>,
}

impl<T> Default for Transform<T> {
    fn default() -> Self {
        Self {
            cmps: Vec::new(),
            preds: Vec::new(),
        }
    }
}

impl<T> Transform<T> {
    /// Create an empty (pass-through) transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add comparison functions from a comma-separated key spec.
    ///
    /// The first key is the primary sort key, later keys break ties.
    /// Keys not present in the registry are silently ignored.
    pub fn order_by(&mut self, spec: &str, sorters: &Sorters<T>) {
        for key in spec.split(',').map(str::trim).filter(|key| !key.is_empty()) {
            if let Some(cmp) = sorters.get(key) {
                self.cmps.push(cmp);
            }
        }
    }

    /// Add a predicate from a single `key=value` spec.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError::FilterParse`] unless the spec contains
    /// exactly one `=`, and [`OutputError::UnsupportedFilter`] when the
    /// key is not in the registry.
    pub fn filter(&mut self, spec: &str, filters: &Filters<T>) -> Result<(), OutputError> {
        if spec.chars().filter(|&c| c == '=').count() != 1 {
            return Err(OutputError::FilterParse(spec.into()));
        }
        let (key, value) = spec
            .split_once('=')
            .ok_or_else(|| OutputError::FilterParse(spec.into()))?;

        let pred = filters
            .get(key)
            .ok_or_else(|| OutputError::UnsupportedFilter(key.into()))?;
        self.preds.push((pred, value.into()));
        Ok(())
    }

    /// Apply the pipeline in place: sort, then filter.
    ///
    /// Filtering preserves the relative order of surviving items. An
    /// empty transform leaves the collection untouched.
    pub fn apply(&self, items: &mut Vec<T>) {
        if !self.cmps.is_empty() {
            items.sort_by(|a, b| self.compare(a, b));
        }
        for (pred, value) in &self.preds {
            items.retain(|item| pred(item, value));
        }
    }

    /// Lexicographic comparison: the last comparator's verdict is taken
    /// verbatim, ties before it fall through to the next key.
    fn compare(&self, a: &T, b: &T) -> Ordering {
        for cmp in &self.cmps {
            match cmp(a, b) {
                Ordering::Equal => {}
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}
