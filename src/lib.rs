//! # setpath
//!
//! Parallel set operations over sorted slices.
//!
//! ## Overview
//!
//! Intersection, union, difference and symmetric difference of two sorted
//! slices are classically computed with a sequential two-pointer merge. This
//! crate produces exactly the same output, element for element, but splits
//! the work across rayon workers:
//!
//! - **Partitioning**: [`partition::balanced_path`] cuts both slices at a
//!   given rank of their merge, keeping matching pairs of equivalent elements
//!   on the same side of the cut.
//! - **Planning**: [`PartitionPlan`] chooses how many partitions to create
//!   from the input size and the available parallelism.
//! - **Strategies**: [`SetOperation`] implementations count and write the
//!   result for one partition.
//! - **Dispatch**: [`dispatch`] counts every partition in parallel, turns the
//!   counts into output offsets with a prefix sum, then writes every partition
//!   into its own disjoint output region in parallel.
//!
//! Inputs are treated as multisets: an element that appears `m` times in the
//! left slice and `n` times in the right appears `min(m, n)` times in the
//! intersection, `max(m, n)` times in the union, and so on.
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for [`SetOperationConfig`]
//!
//! ## Example
//!
//! ```rust
//! use setpath::prelude::*;
//!
//! let left: Vec<u64> = (0..10_000).map(|value| value * 2).collect();
//! let right: Vec<u64> = (0..10_000).map(|value| value * 3).collect();
//!
//! let config = SetOperationConfig::new()
//!     .with_parallelism(4)
//!     .with_min_partition_size(1_000);
//! let common = set_operation_to_vec(&left, &right, Intersection, &config);
//!
//! assert!(common.iter().all(|value| value % 6 == 0));
//! assert_eq!(common.len(), 3_334);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use setpath::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{Parallelism, SetOperationConfig};
    pub use crate::dispatch::{
        dispatch, dispatch_with_plan, par_set_difference, par_set_intersection,
        par_set_symmetric_difference, par_set_union, set_operation, set_operation_by,
        set_operation_len, set_operation_len_by, set_operation_to_vec, set_operation_to_vec_by,
    };
    pub use crate::error::SetOperationError;
    pub use crate::partition::{PartitionBoundary, PartitionPlan, plan_partitions};
    pub use crate::strategy::{Difference, Intersection, SetOperation, SymmetricDifference, Union};
}

pub mod config;
pub mod dispatch;
pub mod error;
pub mod partition;
pub mod scan;
pub mod strategy;

pub use config::{DEFAULT_MIN_PARTITION_SIZE, Parallelism, SetOperationConfig};
pub use dispatch::{
    dispatch, dispatch_with_plan, par_set_difference, par_set_intersection,
    par_set_symmetric_difference, par_set_union, set_operation, set_operation_by,
    set_operation_len, set_operation_len_by, set_operation_to_vec, set_operation_to_vec_by,
};
pub use error::SetOperationError;
pub use partition::{Partition, PartitionBoundary, PartitionPlan, plan_partitions};
pub use strategy::{Difference, Intersection, SetOperation, SymmetricDifference, Union};
