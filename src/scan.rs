//! Exclusive prefix sum.
//!
//! The dispatcher turns per-partition result counts into output offsets with
//! an exclusive scan: each entry becomes the sum of all entries before it.
//! There is one entry per partition, so the scan is never the bottleneck and
//! runs sequentially.

/// Replaces every element with the sum of the elements before it and returns
/// the sum of all elements.
///
/// Appending a trailing `0` before scanning leaves the total in the last
/// slot.
///
/// # Examples
///
/// ```rust
/// use setpath::scan::exclusive_scan;
///
/// let mut offsets = vec![3, 0, 2, 0];
/// let total = exclusive_scan(&mut offsets);
///
/// assert_eq!(offsets, vec![0, 3, 3, 5]);
/// assert_eq!(total, 5);
/// ```
pub fn exclusive_scan(values: &mut [usize]) -> usize {
    values.iter_mut().fold(0, |running, value| {
        let count = *value;
        *value = running;
        running + count
    })
}
