//! Tuning knobs for the partition planner.
//!
//! The planner needs two numbers: how many workers may run at once and how
//! small a partition is allowed to get. Both live in [`SetOperationConfig`]
//! and are passed explicitly to every entry point, so a test can force an
//! exact partition count without touching process-wide state.
//!
//! # Examples
//!
//! ```rust
//! use setpath::{Parallelism, SetOperationConfig};
//!
//! let config = SetOperationConfig::new()
//!     .with_parallelism(4)
//!     .with_min_partition_size(1024);
//!
//! assert_eq!(config.resolved_parallelism(), 4);
//! assert_eq!(config.min_partition_size(), 1024);
//! assert!(matches!(config.parallelism(), Parallelism::Fixed(_)));
//! ```

use std::num::NonZeroUsize;

use crate::error::SetOperationError;

/// Smallest number of combined input elements a partition covers by default.
///
/// Below this size the cost of a rayon task outweighs the merge work, so
/// inputs smaller than this run as a single partition.
pub const DEFAULT_MIN_PARTITION_SIZE: usize = 1 << 20;

const DEFAULT_MIN_PARTITION_SIZE_NON_ZERO: NonZeroUsize =
    match NonZeroUsize::new(DEFAULT_MIN_PARTITION_SIZE) {
        Some(size) => size,
        None => panic!("default minimum partition size must be non-zero"),
    };

/// How many workers the planner may split the input for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Parallelism {
    /// Ask the operating system for the number of logical CPUs.
    #[default]
    Available,

    /// Use exactly this many workers.
    Fixed(NonZeroUsize),
}

impl Parallelism {
    /// Returns the concrete worker count.
    ///
    /// [`Parallelism::Available`] never resolves to less than one worker.
    #[must_use]
    pub fn resolve(self) -> usize {
        match self {
            Self::Available => num_cpus::get().max(1),
            Self::Fixed(workers) => workers.get(),
        }
    }
}

/// Configuration shared by every parallel set operation entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetOperationConfig {
    parallelism: Parallelism,
    min_partition_size: NonZeroUsize,
}

impl SetOperationConfig {
    /// Creates a configuration using all available CPUs and
    /// [`DEFAULT_MIN_PARTITION_SIZE`].
    #[must_use]
    pub const fn new() -> Self {
        Self {
            parallelism: Parallelism::Available,
            min_partition_size: DEFAULT_MIN_PARTITION_SIZE_NON_ZERO,
        }
    }

    /// Fixes the number of workers.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is 0. Use [`try_with_parallelism`](Self::try_with_parallelism)
    /// for a non-panicking version.
    #[must_use]
    pub fn with_parallelism(self, workers: usize) -> Self {
        self.try_with_parallelism(workers)
            .expect("parallelism must be greater than 0")
    }

    /// Fixes the number of workers.
    ///
    /// # Errors
    ///
    /// Returns [`SetOperationError::InvalidParallelism`] if `workers` is 0.
    pub fn try_with_parallelism(self, workers: usize) -> Result<Self, SetOperationError> {
        let workers = NonZeroUsize::new(workers).ok_or(SetOperationError::InvalidParallelism)?;
        Ok(Self {
            parallelism: Parallelism::Fixed(workers),
            ..self
        })
    }

    /// Goes back to querying the number of available CPUs.
    #[must_use]
    pub const fn with_available_parallelism(self) -> Self {
        Self {
            parallelism: Parallelism::Available,
            ..self
        }
    }

    /// Sets the minimum number of combined input elements per partition.
    ///
    /// # Panics
    ///
    /// Panics if `size` is 0. Use
    /// [`try_with_min_partition_size`](Self::try_with_min_partition_size) for a
    /// non-panicking version.
    #[must_use]
    pub fn with_min_partition_size(self, size: usize) -> Self {
        self.try_with_min_partition_size(size)
            .expect("minimum partition size must be greater than 0")
    }

    /// Sets the minimum number of combined input elements per partition.
    ///
    /// # Errors
    ///
    /// Returns [`SetOperationError::InvalidPartitionSize`] if `size` is 0.
    pub fn try_with_min_partition_size(self, size: usize) -> Result<Self, SetOperationError> {
        let size = NonZeroUsize::new(size).ok_or(SetOperationError::InvalidPartitionSize)?;
        Ok(Self {
            min_partition_size: size,
            ..self
        })
    }

    /// Returns the configured parallelism.
    #[must_use]
    pub const fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    /// Returns the concrete worker count the planner will use.
    #[must_use]
    pub fn resolved_parallelism(&self) -> usize {
        self.parallelism.resolve()
    }

    /// Returns the minimum number of combined input elements per partition.
    #[must_use]
    pub const fn min_partition_size(&self) -> usize {
        self.min_partition_size.get()
    }
}

impl Default for SetOperationConfig {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
