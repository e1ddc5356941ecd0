use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use osavl_tree::{OSAvlTree, Rank};
use std::collections::BTreeSet;

const N: usize = 10_000;

// ─── Helper functions to generate value sequences ───────────────────────────

fn ordered_values(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_values(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut values = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        values.push((x >> 33) as i64);
    }
    values
}

// ─── Insert Benchmarks ──────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_ordered");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for v in 0..N as i64 {
                tree.insert(v);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for v in 0..N as i64 {
                set.insert(v);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_reverse");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for v in (0..N as i64).rev() {
                tree.insert(v);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for v in (0..N as i64).rev() {
                set.insert(v);
            }
            set
        });
    });

    group.finish();
}

fn bench_insert_random(c: &mut Criterion) {
    let values = random_values(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut tree = OSAvlTree::new();
            for &v in &values {
                tree.insert(v);
            }
            tree
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut set = BTreeSet::new();
            for &v in &values {
                set.insert(v);
            }
            set
        });
    });

    group.finish();
}

// ─── Lookup Benchmarks ──────────────────────────────────────────────────────

fn bench_contains_ordered(c: &mut Criterion) {
    let values = ordered_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let set: BTreeSet<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("contains_ordered");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if tree.contains(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if set.contains(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

fn bench_contains_random(c: &mut Criterion) {
    let values = random_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let set: BTreeSet<i64> = values.iter().copied().collect();

    let mut group = c.benchmark_group("contains_random");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if tree.contains(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for v in &values {
                if set.contains(v) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

// ─── Rank Benchmarks ────────────────────────────────────────────────────────

fn bench_rank_access(c: &mut Criterion) {
    let values = random_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let mut sorted = values;
    sorted.sort_unstable();

    let mut group = c.benchmark_group("rank_access");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in 0..N {
                sum = sum.wrapping_add(tree[Rank(rank)]);
            }
            sum
        });
    });

    // The fair baseline for repeated positional reads is a sorted Vec;
    // BTreeSet can only reach the k-th element by iterating.
    group.bench_function(BenchmarkId::new("sorted Vec", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for rank in 0..N {
                sum = sum.wrapping_add(sorted[rank]);
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("BTreeSet::iter().nth()", N), |b| {
        let set: BTreeSet<i64> = sorted.iter().copied().collect();
        b.iter(|| {
            let mut sum = 0i64;
            for rank in (0..N).step_by(100) {
                if let Some(&v) = set.iter().nth(rank) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_rank_of(c: &mut Criterion) {
    let values = random_values(N);
    let tree: OSAvlTree<i64> = values.iter().copied().collect();
    let mut sorted = values.clone();
    sorted.sort_unstable();

    let mut group = c.benchmark_group("rank_of");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for v in &values {
                if let Some(rank) = tree.rank_of(v) {
                    sum = sum.wrapping_add(rank);
                }
            }
            sum
        });
    });

    group.bench_function(BenchmarkId::new("sorted Vec", N), |b| {
        b.iter(|| {
            let mut sum = 0usize;
            for v in &values {
                sum = sum.wrapping_add(sorted.partition_point(|x| x < v));
            }
            sum
        });
    });

    group.finish();
}

// ─── Remove Benchmarks ──────────────────────────────────────────────────────

fn bench_remove_ordered(c: &mut Criterion) {
    let values = ordered_values(N);

    let mut group = c.benchmark_group("remove_ordered");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<OSAvlTree<i64>>(),
            |mut tree| {
                for v in &values {
                    tree.remove(v);
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeSet", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<BTreeSet<i64>>(),
            |mut set| {
                for v in &values {
                    set.remove(v);
                }
                set
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_remove_by_rank(c: &mut Criterion) {
    let values = random_values(N);

    let mut group = c.benchmark_group("remove_by_rank");

    group.bench_function(BenchmarkId::new("OSAvlTree", N), |b| {
        b.iter_batched(
            || values.iter().copied().collect::<OSAvlTree<i64>>(),
            |mut tree| {
                // Always take the middle element of what remains.
                while !tree.is_empty() {
                    tree.remove_by_rank(Rank(tree.len() / 2));
                }
                tree
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function(BenchmarkId::new("sorted Vec", N), |b| {
        b.iter_batched(
            || {
                let mut sorted = values.clone();
                sorted.sort_unstable();
                sorted
            },
            |mut sorted| {
                while !sorted.is_empty() {
                    sorted.remove(sorted.len() / 2);
                }
                sorted
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

// ─── Criterion Groups ───────────────────────────────────────────────────────

criterion_group!(insert_benches, bench_insert_ordered, bench_insert_reverse, bench_insert_random,);

criterion_group!(lookup_benches, bench_contains_ordered, bench_contains_random,);

criterion_group!(rank_benches, bench_rank_access, bench_rank_of,);

criterion_group!(remove_benches, bench_remove_ordered, bench_remove_by_rank,);

criterion_main!(insert_benches, lookup_benches, rank_benches, remove_benches);
