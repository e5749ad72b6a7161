//! Sequential vs parallel set operation benchmark.
//!
//! Compares a single sequential `apply` over the whole input against the
//! partitioned dispatcher at several worker counts. Inputs contain runs of
//! duplicates so that the balanced path has to rebalance at most boundaries.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use setpath::{Intersection, SetOperation, SetOperationConfig, Union, set_operation};
use std::hint::black_box;

const SIZES: [u64; 3] = [100_000, 1_000_000, 4_000_000];
const WORKERS: [usize; 3] = [2, 4, 8];

fn generate_inputs(size: u64) -> (Vec<u64>, Vec<u64>) {
    let left: Vec<u64> = (0..size).map(|value| value / 3).collect();
    let right: Vec<u64> = (0..size / 2).map(|value| value / 2 * 3).collect();
    (left, right)
}

fn benchmark_operation<S>(criterion: &mut Criterion, name: &str, operation: S)
where
    S: SetOperation + Copy,
{
    let mut group = criterion.benchmark_group(format!("set_operation_{name}"));

    for size in SIZES {
        let (left, right) = generate_inputs(size);
        let mut output = vec![0; left.len() + right.len()];

        group.bench_with_input(BenchmarkId::new("sequential", size), &size, |bencher, _| {
            bencher.iter(|| {
                black_box(operation.apply(
                    black_box(&left),
                    black_box(&right),
                    &mut output,
                    &u64::cmp,
                ))
            });
        });

        for workers in WORKERS {
            let config = SetOperationConfig::new()
                .with_parallelism(workers)
                .with_min_partition_size(1 << 14);
            group.bench_with_input(
                BenchmarkId::new(format!("parallel_{workers}"), size),
                &size,
                |bencher, _| {
                    bencher.iter(|| {
                        black_box(set_operation(
                            black_box(&left),
                            black_box(&right),
                            &mut output,
                            operation,
                            &config,
                        ))
                    });
                },
            );
        }
    }

    group.finish();
}

fn benchmark_intersection(criterion: &mut Criterion) {
    benchmark_operation(criterion, "intersection", Intersection);
}

fn benchmark_union(criterion: &mut Criterion) {
    benchmark_operation(criterion, "union", Union);
}

criterion_group!(benches, benchmark_intersection, benchmark_union);
criterion_main!(benches);
