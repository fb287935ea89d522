use std::collections::HashSet;

use crate::core::types::SortOrder;

/// A deduplicated, sorted projection of a factor array.
///
/// Each position in the view maps back to the first index in the source array
/// that held that value. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedView {
    values: Vec<i32>,
    original_indices: Vec<usize>,
    order: SortOrder,
    source_len: usize,
}

impl SortedView {
    /// Build a view over `source` in the given order
    #[must_use]
    pub fn new(source: &[i32], order: SortOrder) -> Self {
        // Keep the first occurrence of every value, then sort by value.
        // Values are unique after dedup so the sort needs no stability.
        let mut seen: HashSet<i32> = HashSet::with_capacity(source.len());
        let mut entries: Vec<(i32, usize)> = source
            .iter()
            .enumerate()
            .filter(|(_, v)| seen.insert(**v))
            .map(|(idx, &v)| (v, idx))
            .collect();

        match order {
            SortOrder::Ascending => entries.sort_unstable_by(|a, b| a.0.cmp(&b.0)),
            SortOrder::Descending => entries.sort_unstable_by(|a, b| b.0.cmp(&a.0)),
        }

        let (values, original_indices) = entries.into_iter().unzip();

        Self {
            values,
            original_indices,
            order,
            source_len: source.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn value(&self, i: usize) -> Option<i32> {
        self.values.get(i).copied()
    }

    /// 0-based position in the source array for view position `i`
    pub fn original_index(&self, i: usize) -> Option<usize> {
        self.original_indices.get(i).copied()
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    /// Fraction of source entries removed as duplicates (0.0 for empty input)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duplicate_fraction(&self) -> f64 {
        if self.source_len == 0 {
            return 0.0;
        }
        (self.source_len - self.values.len()) as f64 / self.source_len as f64
    }
}

/// Build the M view (ascending) and the A view (descending) for one run
#[must_use]
pub fn build_index(m: &[i32], a: &[i32]) -> (SortedView, SortedView) {
    (
        SortedView::new(m, SortOrder::Ascending),
        SortedView::new(a, SortOrder::Descending),
    )
}
