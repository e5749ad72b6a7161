//! Parallel count-then-write dispatch.
//!
//! A parallel set operation runs in three phases separated by hard barriers:
//!
//! 1. **Count**: every partition of the [`PartitionPlan`] computes
//!    [`SetOperation::count`] for its sub-slices, in parallel.
//! 2. **Scan**: the counts become output offsets through an
//!    [`exclusive_scan`]; the last offset is the result length.
//! 3. **Apply**: the output is split into one disjoint region per partition
//!    and every partition runs [`SetOperation::apply`] into its own region, in
//!    parallel.
//!
//! Inputs are only read, and each output region is an exclusive `&mut`
//! borrow, so the phases need no locks or atomics. Work runs on the current
//! rayon thread pool; wrap a call in [`rayon::ThreadPool::install`] to pick a
//! different one.
//!
//! A comparator that panics aborts the whole operation: rayon resumes the
//! panic on the calling thread once the current phase has joined. Output
//! contents are unspecified in that case.
//!
//! # Examples
//!
//! ```rust
//! use setpath::{Intersection, SetOperationConfig, set_operation};
//!
//! let left = [1, 2, 2, 4, 6];
//! let right = [2, 3, 4, 4];
//! let mut output = [0; 9];
//!
//! let config = SetOperationConfig::new()
//!     .with_parallelism(3)
//!     .with_min_partition_size(1);
//! let written = set_operation(&left, &right, &mut output, Intersection, &config).unwrap();
//!
//! assert_eq!(&output[..written], &[2, 4]);
//! ```

use std::cmp::Ordering;

use rayon::prelude::*;

use crate::config::SetOperationConfig;
use crate::error::SetOperationError;
use crate::partition::{Partition, PartitionPlan};
use crate::scan::exclusive_scan;
use crate::strategy::{Difference, Intersection, SetOperation, SymmetricDifference, Union};

// =============================================================================
// Core Dispatch
// =============================================================================

/// Runs `operation` over `left` and `right` in parallel and writes the result
/// to the front of `output`.
///
/// Returns the number of elements written. The result is element-for-element
/// identical to `operation.apply(left, right, ..)` run sequentially.
///
/// Both inputs must be sorted under `compare`. This is only checked in debug
/// builds.
///
/// # Errors
///
/// Returns [`SetOperationError::OutputTooSmall`] if `output` cannot hold the
/// result. Nothing is written in that case.
pub fn dispatch<T, F, S>(
    left: &[T],
    right: &[T],
    compare: &F,
    operation: &S,
    output: &mut [T],
    config: &SetOperationConfig,
) -> Result<usize, SetOperationError>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    debug_assert_sorted(left, right, compare);

    if left.is_empty() && right.is_empty() {
        return Ok(0);
    }

    let plan = PartitionPlan::new(left, right, compare, config);
    dispatch_with_plan(left, right, compare, operation, &plan, output)
}

/// Runs the count, scan and apply phases over a precomputed plan.
///
/// `plan` must have been built for exactly these `left` and `right` slices
/// with the same `compare`.
///
/// # Errors
///
/// Returns [`SetOperationError::OutputTooSmall`] if `output` cannot hold the
/// result. Nothing is written in that case.
///
/// # Panics
///
/// Panics if `plan` reaches past the end of either slice, or if `operation`
/// writes more elements than it counted.
pub fn dispatch_with_plan<T, F, S>(
    left: &[T],
    right: &[T],
    compare: &F,
    operation: &S,
    plan: &PartitionPlan,
    output: &mut [T],
) -> Result<usize, SetOperationError>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    let span = tracing::debug_span!(
        "set_operation",
        left_len = left.len(),
        right_len = right.len(),
        partitions = plan.partition_count()
    );
    let _entered = span.enter();

    let offsets = count_phase(left, right, compare, operation, plan);
    let total = offsets.last().copied().unwrap_or(0);

    if output.len() < total {
        return Err(SetOperationError::OutputTooSmall {
            required: total,
            available: output.len(),
        });
    }

    apply_phase(left, right, compare, operation, plan, &offsets, &mut output[..total]);
    Ok(total)
}

/// Phase 1 and 2: per-partition counts turned into `partition_count() + 1`
/// offsets, the last of which is the result length.
fn count_phase<T, F, S>(
    left: &[T],
    right: &[T],
    compare: &F,
    operation: &S,
    plan: &PartitionPlan,
) -> Vec<usize>
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    let mut offsets: Vec<usize> = plan
        .boundaries()
        .par_windows(2)
        .map(|pair| {
            let (left_part, right_part) = Partition::between(pair[0], pair[1]).slices(left, right);
            operation.count(left_part, right_part, compare)
        })
        .collect();

    offsets.push(0);
    let total = exclusive_scan(&mut offsets);
    tracing::trace!(total, offsets = ?offsets, "count phase complete");

    offsets
}

/// Phase 3: every partition writes into its own region of `output`.
fn apply_phase<T, F, S>(
    left: &[T],
    right: &[T],
    compare: &F,
    operation: &S,
    plan: &PartitionPlan,
    offsets: &[usize],
    output: &mut [T],
) where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    let regions = split_regions(output, offsets);

    plan.boundaries()
        .par_windows(2)
        .zip(regions)
        .for_each(|(pair, region)| {
            let (left_part, right_part) = Partition::between(pair[0], pair[1]).slices(left, right);
            let written = operation.apply(left_part, right_part, region, compare);
            debug_assert_eq!(written, region.len(), "count and apply disagree");
        });

    tracing::trace!(written = output.len(), "apply phase complete");
}

/// Splits `output` into consecutive regions `offsets[k]..offsets[k + 1]`.
fn split_regions<'a, T>(output: &'a mut [T], offsets: &[usize]) -> Vec<&'a mut [T]> {
    let mut rest = output;
    offsets
        .windows(2)
        .map(|pair| {
            let (region, tail) = std::mem::take(&mut rest).split_at_mut(pair[1] - pair[0]);
            rest = tail;
            region
        })
        .collect()
}

fn debug_assert_sorted<T, F>(left: &[T], right: &[T], compare: &F)
where
    F: Fn(&T, &T) -> Ordering,
{
    debug_assert!(
        left.is_sorted_by(|a, b| compare(a, b) != Ordering::Greater),
        "left input is not sorted under the comparator"
    );
    debug_assert!(
        right.is_sorted_by(|a, b| compare(a, b) != Ordering::Greater),
        "right input is not sorted under the comparator"
    );
}

// =============================================================================
// Entry Points
// =============================================================================

/// Parallel drop-in for a sequential two-slice set algorithm.
///
/// Writes the result of `operation` over `left` and `right` to the front of
/// `output` and returns the number of elements written.
///
/// # Errors
///
/// Returns [`SetOperationError::OutputTooSmall`] if `output` cannot hold the
/// result. Sizing `output` to `left.len() + right.len()` is always enough for
/// the provided operations.
pub fn set_operation_by<T, F, S>(
    left: &[T],
    right: &[T],
    output: &mut [T],
    compare: F,
    operation: S,
    config: &SetOperationConfig,
) -> Result<usize, SetOperationError>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    dispatch(left, right, &compare, &operation, output, config)
}

/// [`set_operation_by`] using the natural order of `T`.
///
/// # Errors
///
/// Returns [`SetOperationError::OutputTooSmall`] if `output` cannot hold the
/// result.
pub fn set_operation<T, S>(
    left: &[T],
    right: &[T],
    output: &mut [T],
    operation: S,
    config: &SetOperationConfig,
) -> Result<usize, SetOperationError>
where
    T: Ord + Clone + Send + Sync,
    S: SetOperation,
{
    dispatch(left, right, &T::cmp, &operation, output, config)
}

/// Returns the length of the result without writing it.
///
/// Uses the same partition plan and parallel count phase as the full
/// operation.
///
/// # Examples
///
/// ```rust
/// use setpath::{SetOperationConfig, Union, set_operation_len_by};
///
/// let left = [1, 3, 5];
/// let right = [1, 2, 3];
/// let len = set_operation_len_by(&left, &right, i32::cmp, Union, &SetOperationConfig::new());
/// assert_eq!(len, 4);
/// ```
pub fn set_operation_len_by<T, F, S>(
    left: &[T],
    right: &[T],
    compare: F,
    operation: S,
    config: &SetOperationConfig,
) -> usize
where
    T: Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    debug_assert_sorted(left, right, &compare);

    if left.is_empty() && right.is_empty() {
        return 0;
    }

    let plan = PartitionPlan::new(left, right, &compare, config);
    let offsets = count_phase(left, right, &compare, &operation, &plan);
    offsets.last().copied().unwrap_or(0)
}

/// [`set_operation_len_by`] using the natural order of `T`.
pub fn set_operation_len<T, S>(
    left: &[T],
    right: &[T],
    operation: S,
    config: &SetOperationConfig,
) -> usize
where
    T: Ord + Sync,
    S: SetOperation,
{
    set_operation_len_by(left, right, T::cmp, operation, config)
}

/// Runs `operation` in parallel and collects the result into an exactly
/// sized `Vec`.
///
/// # Examples
///
/// ```rust
/// use setpath::{SetOperationConfig, SymmetricDifference, set_operation_to_vec_by};
///
/// let left = [1, 2, 3, 4];
/// let right = [3, 4, 5];
/// let result = set_operation_to_vec_by(
///     &left,
///     &right,
///     i32::cmp,
///     SymmetricDifference,
///     &SetOperationConfig::new(),
/// );
/// assert_eq!(result, vec![1, 2, 5]);
/// ```
pub fn set_operation_to_vec_by<T, F, S>(
    left: &[T],
    right: &[T],
    compare: F,
    operation: S,
    config: &SetOperationConfig,
) -> Vec<T>
where
    T: Clone + Send + Sync,
    F: Fn(&T, &T) -> Ordering + Sync,
    S: SetOperation,
{
    debug_assert_sorted(left, right, &compare);

    // Every result element is a clone of an input element, so any input
    // element can fill the buffer before the apply phase overwrites it.
    let Some(filler) = left.first().or_else(|| right.first()) else {
        return Vec::new();
    };

    let plan = PartitionPlan::new(left, right, &compare, config);
    let offsets = count_phase(left, right, &compare, &operation, &plan);
    let total = offsets.last().copied().unwrap_or(0);
    if total == 0 {
        return Vec::new();
    }

    let mut output = vec![filler.clone(); total];
    apply_phase(left, right, &compare, &operation, &plan, &offsets, &mut output);
    output
}

/// [`set_operation_to_vec_by`] using the natural order of `T`.
pub fn set_operation_to_vec<T, S>(
    left: &[T],
    right: &[T],
    operation: S,
    config: &SetOperationConfig,
) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
    S: SetOperation,
{
    set_operation_to_vec_by(left, right, T::cmp, operation, config)
}

/// Parallel multiset intersection of two sorted slices with the default
/// configuration.
///
/// ```rust
/// assert_eq!(setpath::par_set_intersection(&[1, 2, 2, 4, 6], &[2, 3, 4, 4]), vec![2, 4]);
/// ```
pub fn par_set_intersection<T>(left: &[T], right: &[T]) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
{
    set_operation_to_vec(left, right, Intersection, &SetOperationConfig::default())
}

/// Parallel multiset union of two sorted slices with the default
/// configuration.
///
/// ```rust
/// assert_eq!(setpath::par_set_union(&[], &[1, 2, 3]), vec![1, 2, 3]);
/// ```
pub fn par_set_union<T>(left: &[T], right: &[T]) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
{
    set_operation_to_vec(left, right, Union, &SetOperationConfig::default())
}

/// Parallel multiset difference (`left - right`) of two sorted slices with the
/// default configuration.
pub fn par_set_difference<T>(left: &[T], right: &[T]) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
{
    set_operation_to_vec(left, right, Difference, &SetOperationConfig::default())
}

/// Parallel multiset symmetric difference of two sorted slices with the
/// default configuration.
pub fn par_set_symmetric_difference<T>(left: &[T], right: &[T]) -> Vec<T>
where
    T: Ord + Clone + Send + Sync,
{
    set_operation_to_vec(
        left,
        right,
        SymmetricDifference,
        &SetOperationConfig::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::num::NonZeroUsize;

    fn forced(workers: usize) -> SetOperationConfig {
        SetOperationConfig::new()
            .with_parallelism(workers)
            .with_min_partition_size(1)
    }

    #[rstest]
    fn test_split_regions_follows_offsets() {
        let mut output = [0, 1, 2, 3, 4, 5];
        let regions = split_regions(&mut output, &[0, 2, 2, 5]);
        let lengths: Vec<usize> = regions.iter().map(|region| region.len()).collect();
        assert_eq!(lengths, vec![2, 0, 3]);
        assert_eq!(regions[2], &mut [2, 3, 4][..]);
    }

    #[rstest]
    fn test_empty_input_is_a_no_op() {
        let empty: [i32; 0] = [];
        let mut output = [9, 9];
        let written = set_operation(&empty, &empty, &mut output, Union, &forced(4)).unwrap();
        assert_eq!(written, 0);
        assert_eq!(output, [9, 9]);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(5)]
    fn test_intersection_scenario(#[case] workers: usize) {
        let left = [1, 2, 2, 4, 6];
        let right = [2, 3, 4, 4];
        let mut output = [0; 9];
        let written =
            set_operation(&left, &right, &mut output, Intersection, &forced(workers)).unwrap();
        assert_eq!(&output[..written], &[2, 4]);
    }

    #[rstest]
    fn test_output_too_small_leaves_output_untouched() {
        let left = [1, 2, 3, 4];
        let right = [5, 6];
        let mut output = [0; 3];
        let result = set_operation(&left, &right, &mut output, Union, &forced(2));
        assert_eq!(
            result,
            Err(SetOperationError::OutputTooSmall {
                required: 6,
                available: 3
            })
        );
        assert_eq!(output, [0, 0, 0]);
    }

    #[rstest]
    fn test_exact_output_size_is_enough() {
        let left = [1, 2, 3, 4];
        let right = [5, 6];
        let mut output = [0; 6];
        let written = set_operation(&left, &right, &mut output, Union, &forced(3)).unwrap();
        assert_eq!(written, 6);
        assert_eq!(output, [1, 2, 3, 4, 5, 6]);
    }

    #[rstest]
    fn test_dispatch_with_plan_handles_empty_partitions() {
        let left = [1, 1, 1];
        let right = [1];
        let plan = PartitionPlan::with_partition_count(
            &left,
            &right,
            &i32::cmp,
            NonZeroUsize::new(8).unwrap(),
        );
        let mut output = [0; 4];
        let written =
            dispatch_with_plan(&left, &right, &i32::cmp, &Difference, &plan, &mut output).unwrap();
        assert_eq!(&output[..written], &[1, 1]);
    }

    #[rstest]
    fn test_len_matches_to_vec() {
        let left: Vec<u32> = (0..200).map(|value| value / 3).collect();
        let right: Vec<u32> = (0..150).map(|value| value / 2).collect();
        let config = forced(4);

        let len = set_operation_len(&left, &right, SymmetricDifference, &config);
        let result = set_operation_to_vec(&left, &right, SymmetricDifference, &config);
        assert_eq!(len, result.len());
    }

    #[rstest]
    fn test_to_vec_with_empty_result() {
        let left = [1, 2];
        let right = [3, 4];
        assert!(par_set_intersection(&left, &right).is_empty());
    }

    #[rstest]
    #[should_panic(expected = "comparator failed")]
    fn test_comparator_panic_propagates() {
        let left: Vec<i32> = (0..64).collect();
        let right: Vec<i32> = (32..96).collect();
        let compare = |a: &i32, b: &i32| {
            assert!(*a != 50 && *b != 50, "comparator failed");
            a.cmp(b)
        };
        let _ = set_operation_to_vec_by(&left, &right, compare, Intersection, &forced(4));
    }
}
