//! Set operations over sorted slices.
//!
//! A [`SetOperation`] knows how to combine two sorted sub-slices, either by
//! counting the result ([`SetOperation::count`]) or by writing it
//! ([`SetOperation::apply`]). The dispatcher calls `count` on every partition
//! to size the output, then `apply` on every partition to fill it.
//!
//! The four classical operations are provided:
//!
//! | Operation | Copies of `x` emitted (`m` in left, `n` in right) |
//! |-----------|---------------------------------------------------|
//! | [`Intersection`] | `min(m, n)` |
//! | [`Union`] | `max(m, n)` |
//! | [`Difference`] | `max(m - n, 0)` |
//! | [`SymmetricDifference`] | `abs(m - n)` |
//!
//! All of them follow the two-pointer merge: equivalent elements are paired
//! in order, and where a pair is emitted the left element is the one written.
//!
//! # Examples
//!
//! ```rust
//! use setpath::{Intersection, SetOperation};
//!
//! let left = [1, 2, 2, 4, 6];
//! let right = [2, 3, 4, 4];
//! let mut output = [0; 2];
//!
//! assert_eq!(Intersection.count(&left, &right, &i32::cmp), 2);
//! assert_eq!(Intersection.apply(&left, &right, &mut output, &i32::cmp), 2);
//! assert_eq!(output, [2, 4]);
//! ```

mod operations;

use std::cmp::Ordering;

pub use operations::{Difference, Intersection, SymmetricDifference, Union};

/// A set operation over two sorted slices.
///
/// Both methods must agree: `apply` writes exactly `count` elements for the
/// same inputs. Implementations must also compose: running them on
/// consecutive balanced partitions and concatenating the results must equal
/// running them once on the whole input.
pub trait SetOperation: Sync {
    /// Returns the number of elements [`apply`](Self::apply) would write.
    fn count<T, F>(&self, left: &[T], right: &[T], compare: &F) -> usize
    where
        F: Fn(&T, &T) -> Ordering;

    /// Writes the result to the front of `output` and returns the number of
    /// elements written.
    ///
    /// # Panics
    ///
    /// Panics if `output` is shorter than [`count`](Self::count).
    fn apply<T, F>(&self, left: &[T], right: &[T], output: &mut [T], compare: &F) -> usize
    where
        T: Clone,
        F: Fn(&T, &T) -> Ordering;
}

/// Which elements of a two-pointer merge end up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MergeRules {
    /// Emit a left element that has no equivalent partner in right.
    pub(crate) left_only: bool,
    /// Emit a right element that has no equivalent partner in left.
    pub(crate) right_only: bool,
    /// Emit the left element of an equivalent pair.
    pub(crate) matched: bool,
}

/// Destination of a merge walk.
trait Emitter<T> {
    fn emit(&mut self, element: &T);

    fn emit_all(&mut self, elements: &[T]);
}

#[derive(Debug, Default)]
struct Counter {
    count: usize,
}

impl<T> Emitter<T> for Counter {
    #[inline]
    fn emit(&mut self, _element: &T) {
        self.count += 1;
    }

    #[inline]
    fn emit_all(&mut self, elements: &[T]) {
        self.count += elements.len();
    }
}

struct SliceWriter<'a, T> {
    output: &'a mut [T],
    written: usize,
}

impl<T: Clone> Emitter<T> for SliceWriter<'_, T> {
    #[inline]
    fn emit(&mut self, element: &T) {
        self.output[self.written] = element.clone();
        self.written += 1;
    }

    #[inline]
    fn emit_all(&mut self, elements: &[T]) {
        let end = self.written + elements.len();
        self.output[self.written..end].clone_from_slice(elements);
        self.written = end;
    }
}

/// Index-based two-pointer merge shared by counting and writing.
fn walk<T, F, E>(rules: MergeRules, left: &[T], right: &[T], compare: &F, emitter: &mut E)
where
    F: Fn(&T, &T) -> Ordering,
    E: Emitter<T>,
{
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match compare(&left[left_index], &right[right_index]) {
            Ordering::Less => {
                if rules.left_only {
                    emitter.emit(&left[left_index]);
                }
                left_index += 1;
            }
            Ordering::Greater => {
                if rules.right_only {
                    emitter.emit(&right[right_index]);
                }
                right_index += 1;
            }
            Ordering::Equal => {
                if rules.matched {
                    emitter.emit(&left[left_index]);
                }
                left_index += 1;
                right_index += 1;
            }
        }
    }

    if rules.left_only {
        emitter.emit_all(&left[left_index..]);
    }
    if rules.right_only {
        emitter.emit_all(&right[right_index..]);
    }
}

pub(crate) fn count_with<T, F>(rules: MergeRules, left: &[T], right: &[T], compare: &F) -> usize
where
    F: Fn(&T, &T) -> Ordering,
{
    let mut counter = Counter::default();
    walk(rules, left, right, compare, &mut counter);
    counter.count
}

pub(crate) fn apply_with<T, F>(
    rules: MergeRules,
    left: &[T],
    right: &[T],
    output: &mut [T],
    compare: &F,
) -> usize
where
    T: Clone,
    F: Fn(&T, &T) -> Ordering,
{
    let mut writer = SliceWriter { output, written: 0 };
    walk(rules, left, right, compare, &mut writer);
    writer.written
}
