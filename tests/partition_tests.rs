//! Integration tests for diagonal partitioning and partition planning.

use std::num::NonZeroUsize;

use rstest::rstest;
use setpath::partition::{PartitionBoundary, PartitionPlan, balanced_path, merge_path};
use setpath::SetOperationConfig;

fn boundary_pairs(left: &[i32], right: &[i32]) -> Vec<(usize, usize)> {
    (0..=left.len() + right.len())
        .map(|diagonal| {
            let boundary = balanced_path(left, right, diagonal, &i32::cmp);
            (boundary.left(), boundary.right())
        })
        .collect()
}

#[rstest]
#[case(&[], &[])]
#[case(&[1, 2, 3], &[])]
#[case(&[], &[1, 2, 3])]
#[case(&[1, 2, 2, 4, 6], &[2, 3, 4, 4])]
#[case(&[5, 5, 5, 5], &[5, 5])]
fn test_end_point_diagonals(#[case] left: &[i32], #[case] right: &[i32]) {
    let total = left.len() + right.len();
    assert_eq!(
        balanced_path(left, right, 0, &i32::cmp),
        PartitionBoundary::new(0, 0, 0)
    );
    assert_eq!(
        balanced_path(left, right, total, &i32::cmp),
        PartitionBoundary::new(left.len(), right.len(), total)
    );
}

#[rstest]
fn test_exhausted_sequence_maps_diagonal_onto_the_other() {
    let right = [1, 2, 3, 4];
    for diagonal in 0..=4 {
        let boundary = balanced_path(&[], &right, diagonal, &i32::cmp);
        assert_eq!((boundary.left(), boundary.right()), (0, diagonal));
    }
}

#[rstest]
#[case(&[1, 2, 2, 4, 6], &[2, 3, 4, 4])]
#[case(&[1, 1, 1, 1, 1], &[1, 1, 1])]
#[case(&[0, 3, 3, 3, 9], &[3, 3, 3, 3, 3, 3])]
fn test_boundaries_are_monotone_and_near_the_diagonal(
    #[case] left: &[i32],
    #[case] right: &[i32],
) {
    let pairs = boundary_pairs(left, right);

    for (diagonal, &(i, j)) in pairs.iter().enumerate() {
        assert!(i + j == diagonal || i + j == diagonal + 1);
        assert!(i <= left.len() && j <= right.len());
    }
    for window in pairs.windows(2) {
        assert!(window[0].0 <= window[1].0);
        assert!(window[0].1 <= window[1].1);
    }
}

#[rstest]
fn test_merge_path_matches_stable_merge_prefix() {
    let left = [1, 3, 3, 7];
    let right = [2, 3, 8];
    // stable merge, left first on ties: 1L 2R 3L 3L 3R 7L 8R
    let expected = [0, 1, 1, 2, 3, 3, 4, 4];
    for (diagonal, &left_count) in expected.iter().enumerate() {
        assert_eq!(merge_path(&left, &right, diagonal, &i32::cmp), left_count);
    }
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(4)]
#[case(7)]
#[case(13)]
fn test_plan_boundaries_are_diagonal_stable(#[case] partitions: usize) {
    let left = [0, 1, 1, 2, 2, 2, 3, 5, 5, 8];
    let right = [1, 2, 2, 2, 2, 5, 6];
    let plan = PartitionPlan::with_partition_count(
        &left,
        &right,
        &i32::cmp,
        NonZeroUsize::new(partitions).unwrap(),
    );

    for boundary in plan.boundaries() {
        assert_eq!(
            *boundary,
            balanced_path(&left, &right, boundary.diagonal(), &i32::cmp)
        );
    }
}

#[rstest]
fn test_partitions_cover_inputs_exactly_once() {
    let left: Vec<i32> = (0..97).map(|value| value / 4).collect();
    let right: Vec<i32> = (0..61).map(|value| value / 3).collect();
    let config = SetOperationConfig::new()
        .with_parallelism(6)
        .with_min_partition_size(1);
    let plan = PartitionPlan::new(&left, &right, &i32::cmp, &config);

    let mut next_left = 0;
    let mut next_right = 0;
    for partition in plan.partitions() {
        assert_eq!(partition.left().start, next_left);
        assert_eq!(partition.right().start, next_right);
        next_left = partition.left().end;
        next_right = partition.right().end;
    }
    assert_eq!((next_left, next_right), (left.len(), right.len()));
}

#[rstest]
fn test_plan_size_formula() {
    let left: Vec<i32> = (0..1_000).collect();
    let right: Vec<i32> = (0..500).collect();
    let config = SetOperationConfig::new()
        .with_parallelism(4)
        .with_min_partition_size(100);

    let plan = PartitionPlan::new(&left, &right, &i32::cmp, &config);

    assert_eq!(plan.partition_size(), 375);
    assert_eq!(plan.partition_count(), 4);
}

#[rstest]
fn test_plan_never_exceeds_parallelism() {
    let left: Vec<i32> = (0..1_000).collect();
    let right: Vec<i32> = (0..1_000).collect();
    for workers in 1..=16 {
        let config = SetOperationConfig::new()
            .with_parallelism(workers)
            .with_min_partition_size(1);
        let plan = PartitionPlan::new(&left, &right, &i32::cmp, &config);
        assert!(plan.partition_count() <= workers);
        assert!(plan.partition_count() >= 1);
    }
}
