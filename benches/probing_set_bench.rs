use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use hash_tables::{Growth, ProbingSet};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = i32> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some((s >> 33) as i32)
    })
}

fn filled(seed: u64, n: usize, growth: Growth) -> (ProbingSet, Vec<i32>) {
    let keys: Vec<_> = lcg(seed).take(n).collect();
    let mut s = ProbingSet::with_growth(16, growth).unwrap();
    for &k in &keys {
        s.insert(k).unwrap();
    }
    (s, keys)
}

fn bench_insert_growing(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).collect();
    for (name, growth) in [
        ("probing_set_insert_10k_doubling", Growth::Doubling),
        ("probing_set_insert_10k_prime", Growth::Prime),
    ] {
        c.bench_function(name, |b| {
            b.iter_batched(
                || ProbingSet::with_growth(16, growth).unwrap(),
                |mut s| {
                    for &k in &keys {
                        s.insert(k).unwrap();
                    }
                    black_box(s)
                },
                BatchSize::SmallInput,
            )
        });
    }
}

fn bench_contains_hit(c: &mut Criterion) {
    c.bench_function("probing_set_contains_hit", |b| {
        let (s, keys) = filled(7, 20_000, Growth::Doubling);
        let mut it = keys.iter().cycle();
        b.iter(|| black_box(s.contains(*it.next().unwrap())))
    });
}

// Discard/insert churn leaves tombstones on the probe paths of live keys.
fn bench_churn(c: &mut Criterion) {
    c.bench_function("probing_set_discard_insert_churn", |b| {
        let (mut s, keys) = filled(11, 10_000, Growth::Doubling);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = *it.next().unwrap();
            s.discard(k);
            s.insert(k).unwrap();
        })
    });
}

fn bench_algebra(c: &mut Criterion) {
    c.bench_function("probing_set_union_intersection_5k", |b| {
        let (a, _) = filled(13, 5_000, Growth::Doubling);
        let (other, _) = filled(17, 5_000, Growth::Doubling);
        b.iter(|| {
            let u = a.union(&other).unwrap();
            let i = a.intersection(&other).unwrap();
            black_box((u.len(), i.len()))
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert_growing, bench_contains_hit, bench_churn, bench_algebra
}
criterion_main!(benches);
