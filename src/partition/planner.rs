//! Partition planning.
//!
//! A plan cuts the merge of two sorted slices into partitions of roughly equal
//! combined size and records the `partition_count() + 1` boundaries between
//! them. Partition `k` spans boundary `k` to boundary `k + 1`; the first
//! boundary is always `(0, 0)` and the last always `(left.len(), right.len())`.
//!
//! Partitions are sized by total work: the planner counts elements of both
//! slices together, so a skewed input (one long slice, one short) still
//! splits evenly.

use std::cmp::Ordering;
use std::num::NonZeroUsize;

use rayon::prelude::*;

use super::{Partition, PartitionBoundary, balanced_path};
use crate::config::SetOperationConfig;

/// Ordered partition boundaries for one pair of inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionPlan {
    boundaries: Vec<PartitionBoundary>,
    partition_size: usize,
}

impl PartitionPlan {
    /// Plans partitions according to `config`.
    ///
    /// The partition size is
    /// `max(min_partition_size, ceil(total / parallelism))` and the number of
    /// partitions is `ceil(total / partition_size)`. An empty input yields an
    /// empty plan with no boundaries at all.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use setpath::{PartitionPlan, SetOperationConfig};
    ///
    /// let left: Vec<u32> = (0..60).collect();
    /// let right: Vec<u32> = (0..40).collect();
    /// let config = SetOperationConfig::new()
    ///     .with_parallelism(4)
    ///     .with_min_partition_size(10);
    ///
    /// let plan = PartitionPlan::new(&left, &right, &u32::cmp, &config);
    /// assert_eq!(plan.partition_size(), 25);
    /// assert_eq!(plan.partition_count(), 4);
    /// assert_eq!(plan.boundaries().len(), 5);
    /// ```
    pub fn new<T, F>(left: &[T], right: &[T], compare: &F, config: &SetOperationConfig) -> Self
    where
        T: Sync,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let total = left.len() + right.len();
        let partition_size = partition_size_for(
            total,
            config.resolved_parallelism(),
            config.min_partition_size(),
        );
        let partition_count = total.div_ceil(partition_size);

        tracing::debug!(
            left_len = left.len(),
            right_len = right.len(),
            partition_size,
            partition_count,
            "planning set operation partitions"
        );

        let boundaries = find_boundaries(left, right, compare, partition_count, |index| {
            index.saturating_mul(partition_size).min(total)
        });

        Self {
            boundaries,
            partition_size,
        }
    }

    /// Plans exactly `count` partitions by splitting the merge at evenly
    /// spaced diagonals.
    ///
    /// When `count` exceeds the combined input length some partitions are
    /// empty. An empty input still yields an empty plan.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::num::NonZeroUsize;
    /// use setpath::PartitionPlan;
    ///
    /// let left = [1, 2, 2, 4, 6];
    /// let right = [2, 3, 4, 4];
    /// let count = NonZeroUsize::new(5).unwrap();
    ///
    /// let plan = PartitionPlan::with_partition_count(&left, &right, &i32::cmp, count);
    /// assert_eq!(plan.partition_count(), 5);
    /// ```
    pub fn with_partition_count<T, F>(
        left: &[T],
        right: &[T],
        compare: &F,
        count: NonZeroUsize,
    ) -> Self
    where
        T: Sync,
        F: Fn(&T, &T) -> Ordering + Sync,
    {
        let total = left.len() + right.len();
        let count = count.get();
        if total == 0 {
            return Self {
                boundaries: Vec::new(),
                partition_size: 0,
            };
        }

        let quotient = total / count;
        let remainder = total % count;
        let boundaries = find_boundaries(left, right, compare, count, |index| {
            index * quotient + index * remainder / count
        });

        Self {
            boundaries,
            partition_size: total.div_ceil(count),
        }
    }

    /// Returns the boundaries, ordered by diagonal.
    #[must_use]
    pub fn boundaries(&self) -> &[PartitionBoundary] {
        &self.boundaries
    }

    /// Returns the number of partitions.
    #[must_use]
    pub fn partition_count(&self) -> usize {
        self.boundaries.len().saturating_sub(1)
    }

    /// Returns the nominal combined size of each partition.
    ///
    /// A starred boundary can make a partition one element larger.
    #[must_use]
    pub const fn partition_size(&self) -> usize {
        self.partition_size
    }

    /// Returns `true` if the plan has no partitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.partition_count() == 0
    }

    /// Iterates over the partitions in merge order.
    pub fn partitions(&self) -> impl ExactSizeIterator<Item = Partition> + '_ {
        self.boundaries
            .windows(2)
            .map(|pair| Partition::between(pair[0], pair[1]))
    }
}

/// Plans partitions for `left` and `right` according to `config`.
///
/// Shorthand for [`PartitionPlan::new`].
pub fn plan_partitions<T, F>(
    left: &[T],
    right: &[T],
    compare: &F,
    config: &SetOperationConfig,
) -> PartitionPlan
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
{
    PartitionPlan::new(left, right, compare, config)
}

fn partition_size_for(total: usize, parallelism: usize, min_partition_size: usize) -> usize {
    min_partition_size.max(total.div_ceil(parallelism.max(1)))
}

/// Searches every boundary independently, in parallel.
fn find_boundaries<T, F, D>(
    left: &[T],
    right: &[T],
    compare: &F,
    partition_count: usize,
    diagonal_of: D,
) -> Vec<PartitionBoundary>
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    D: Fn(usize) -> usize + Sync,
{
    if partition_count == 0 {
        return Vec::new();
    }

    (0..=partition_count)
        .into_par_iter()
        .map(|index| balanced_path(left, right, diagonal_of(index), compare))
        .collect()
}
