//! Batch planning.
//!
//! A [`BatchPlan`] splits `[0, total_count)` into consecutive ranges of
//! `batch_size` documents. Every range is full except possibly the last,
//! which holds the remainder. An empty collection produces an empty plan.

use std::num::NonZeroU64;

/// One fetch/post cycle: documents `[start, start + rows)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchDescriptor {
    /// Zero-based position of the batch in its plan.
    pub index: u64,
    pub start: u64,
    /// Always greater than zero.
    pub rows: u64,
}

impl BatchDescriptor {
    /// Exclusive end offset.
    pub fn end(&self) -> u64 {
        self.start + self.rows
    }
}

impl std::fmt::Display for BatchDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "batch {} (start={}, rows={})",
            self.index, self.start, self.rows
        )
    }
}

/// The ordered batches needed to copy `total_count` documents.
///
/// Descriptors are computed on iteration, so a plan for a very large
/// collection costs nothing up front.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    total_count: u64,
    batch_size: NonZeroU64,
}

impl BatchPlan {
    pub fn new(total_count: u64, batch_size: NonZeroU64) -> Self {
        Self {
            total_count,
            batch_size,
        }
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn batch_size(&self) -> u64 {
        self.batch_size.get()
    }

    /// Number of batches: `ceil(total_count / batch_size)`.
    pub fn len(&self) -> u64 {
        self.total_count.div_ceil(self.batch_size.get())
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Descriptor for batch `index`, or `None` past the end of the plan.
    pub fn get(&self, index: u64) -> Option<BatchDescriptor> {
        if index >= self.len() {
            return None;
        }
        let batch_size = self.batch_size.get();
        let start = index * batch_size;
        let rows = batch_size.min(self.total_count - start);
        Some(BatchDescriptor { index, start, rows })
    }

    pub fn iter(&self) -> BatchPlanIter {
        BatchPlanIter {
            plan: *self,
            next: 0,
        }
    }
}

impl IntoIterator for BatchPlan {
    type Item = BatchDescriptor;
    type IntoIter = BatchPlanIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &BatchPlan {
    type Item = BatchDescriptor;
    type IntoIter = BatchPlanIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the descriptors of a [`BatchPlan`].
#[derive(Debug, Clone)]
pub struct BatchPlanIter {
    plan: BatchPlan,
    next: u64,
}

impl Iterator for BatchPlanIter {
    type Item = BatchDescriptor;

    fn next(&mut self) -> Option<Self::Item> {
        let batch = self.plan.get(self.next)?;
        self.next += 1;
        Some(batch)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.plan.len().saturating_sub(self.next);
        let remaining = usize::try_from(remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BatchPlanIter {}
