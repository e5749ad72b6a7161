//! Diagonal partitioning of two sorted slices.
//!
//! Merging two sorted slices `left` and `right` traces a staircase through the
//! `left.len() x right.len()` grid of comparisons: every step consumes one
//! element of either slice. Diagonal `d` of that grid is the set of points
//! `(i, j)` with `i + j = d`, and the merge path crosses each diagonal exactly
//! once. Finding the crossing point splits both slices so that the merge of
//! the two prefixes is exactly the first `d` merged elements.
//!
//! [`merge_path`] finds that point with a binary search along the diagonal.
//! Equivalent elements are ordered left-first, the same rule a stable merge
//! uses.
//!
//! The merge path alone is not enough for set operations over multisets: a
//! matching pair of equivalent elements may end up on different sides of the
//! cut. [`balanced_path`] shifts the point inside the run of equivalent
//! elements so that the prefix holds the same number of copies from both
//! sides, keeping every pair together. When that needs one extra element the
//! boundary is *starred* and lies on diagonal `d + 1` instead of `d`.
//!
//! Both functions depend only on their arguments, so a given diagonal always
//! yields the same boundary no matter how many other boundaries are computed.
//!
//! # Examples
//!
//! ```rust
//! use setpath::partition::balanced_path;
//!
//! let left = [2, 2];
//! let right = [2, 2];
//!
//! // The first merged element is a `2` from `left`; its partner from `right`
//! // is pulled into the same prefix.
//! let boundary = balanced_path(&left, &right, 1, &i32::cmp);
//! assert_eq!((boundary.left(), boundary.right()), (1, 1));
//! assert!(boundary.is_starred());
//! ```

pub mod planner;

use std::cmp::Ordering;
use std::ops::Range;

pub use planner::{PartitionPlan, plan_partitions};

/// A split point of both input slices.
///
/// `left()` elements of the left slice and `right()` elements of the right
/// slice form the prefix. For the boundary found on `diagonal()`, the prefix
/// length is either `diagonal()` or, for a starred boundary, `diagonal() + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PartitionBoundary {
    left: usize,
    right: usize,
    diagonal: usize,
}

impl PartitionBoundary {
    /// Creates a boundary.
    #[must_use]
    pub const fn new(left: usize, right: usize, diagonal: usize) -> Self {
        Self {
            left,
            right,
            diagonal,
        }
    }

    /// Number of left-slice elements before the split.
    #[must_use]
    pub const fn left(&self) -> usize {
        self.left
    }

    /// Number of right-slice elements before the split.
    #[must_use]
    pub const fn right(&self) -> usize {
        self.right
    }

    /// The diagonal this boundary was searched on.
    #[must_use]
    pub const fn diagonal(&self) -> usize {
        self.diagonal
    }

    /// Returns `true` if the boundary took one extra element from the right
    /// slice to keep an equivalent pair together.
    #[must_use]
    pub const fn is_starred(&self) -> bool {
        self.left + self.right > self.diagonal
    }
}

/// The sub-ranges of both slices between two consecutive boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    left: Range<usize>,
    right: Range<usize>,
}

impl Partition {
    /// Creates the partition spanning `begin..end`.
    #[must_use]
    pub const fn between(begin: PartitionBoundary, end: PartitionBoundary) -> Self {
        Self {
            left: begin.left..end.left,
            right: begin.right..end.right,
        }
    }

    /// Index range into the left slice.
    #[must_use]
    pub fn left(&self) -> Range<usize> {
        self.left.clone()
    }

    /// Index range into the right slice.
    #[must_use]
    pub fn right(&self) -> Range<usize> {
        self.right.clone()
    }

    /// Combined number of input elements covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// Returns `true` if the partition covers no input.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    /// Borrows this partition's sub-slices.
    ///
    /// # Panics
    ///
    /// Panics if the partition was planned for shorter slices.
    #[must_use]
    pub fn slices<'a, T>(&self, left: &'a [T], right: &'a [T]) -> (&'a [T], &'a [T]) {
        (&left[self.left()], &right[self.right()])
    }
}

/// Finds where the merge path crosses `diagonal`.
///
/// Returns the number of `left` elements among the first `diagonal` merged
/// elements; the remaining `diagonal - i` come from `right`. Equivalent
/// elements are taken from `left` first.
///
/// Runs in `O(log min(left.len(), right.len()))` comparisons.
///
/// # Panics
///
/// Panics if `diagonal > left.len() + right.len()`.
pub fn merge_path<T, F>(left: &[T], right: &[T], diagonal: usize, compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    assert!(
        diagonal <= left.len() + right.len(),
        "diagonal {diagonal} is outside the merge of {} and {} elements",
        left.len(),
        right.len()
    );

    let mut begin = diagonal.saturating_sub(right.len());
    let mut end = diagonal.min(left.len());

    while begin < end {
        let middle = begin + (end - begin) / 2;
        // left[middle] is merged before right[diagonal - 1 - middle] unless it is strictly greater
        if compare(&right[diagonal - 1 - middle], &left[middle]) == Ordering::Less {
            end = middle;
        } else {
            begin = middle + 1;
        }
    }

    begin
}

/// Finds the balanced partition boundary for `diagonal`.
///
/// Starts from [`merge_path`] and, if the cut falls inside a run of elements
/// equivalent to `right[j]`, redistributes the consumed part of that run so
/// that both sides contribute the same number of copies. When the run
/// position is odd and `right` still holds an unconsumed copy, that copy is
/// pulled into the prefix and the boundary is starred.
///
/// The result satisfies:
///
/// - `diagonal == 0` yields `(0, 0)`
/// - `diagonal == left.len() + right.len()` yields `(left.len(), right.len())`
/// - the left-prefix length is nondecreasing in `diagonal`, and so is the
///   right-prefix length
///
/// # Panics
///
/// Panics if `diagonal > left.len() + right.len()`.
pub fn balanced_path<T, F>(left: &[T], right: &[T], diagonal: usize, compare: &F) -> PartitionBoundary
where
    F: Fn(&T, &T) -> Ordering,
{
    let left_index = merge_path(left, right, diagonal, compare);
    let right_index = diagonal - left_index;

    if right_index == right.len() {
        return PartitionBoundary::new(left_index, right_index, diagonal);
    }

    let pivot = &right[right_index];
    let is_below_pivot = |element: &T| compare(element, pivot) == Ordering::Less;

    // start of the pivot run inside each consumed prefix
    let left_start = left[..left_index].partition_point(is_below_pivot);
    let right_start = right[..right_index].partition_point(is_below_pivot);

    let left_run = left_index - left_start;
    let right_run = right_index - right_start;
    let run = left_run + right_run;

    if run == 0 {
        return PartitionBoundary::new(left_index, right_index, diagonal);
    }

    // Try to give half of the run to the right side. Only right copies up to
    // one past the target are looked at.
    let mut right_advance = (run / 2).max(right_run);
    let right_end = right.len().min(right_start + right_advance + 1);
    let right_run_end = right_index
        + right[right_index..right_end]
            .partition_point(|element| compare(pivot, element) != Ordering::Less);
    let right_available = right_run_end - right_start;

    right_advance = right_advance.min(right_available);
    let left_advance = run - right_advance;
    let starred = left_advance == right_advance + 1 && right_advance < right_available;

    PartitionBoundary::new(
        left_start + left_advance,
        right_start + right_advance + usize::from(starred),
        diagonal,
    )
}
