use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use linear_hash_set::{HashingMode, LinearHashSet, SetConfig};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (LinearHashSet<String>, Vec<String>) {
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    let mut s = LinearHashSet::new();
    s.add_all(keys.iter().cloned());
    (s, keys)
}

fn bench_add(c: &mut Criterion) {
    c.bench_function("linear_hash_set_add_10k", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || (LinearHashSet::<String>::new(), keys.clone()),
            |(mut s, keys)| {
                for k in keys {
                    s.add(k);
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_presized(c: &mut Criterion) {
    c.bench_function("linear_hash_set_add_10k_presized", |b| {
        let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
        b.iter_batched(
            || {
                let s = LinearHashSet::<String>::with_capacity(16_384)
                    .expect("valid capacity");
                (s, keys.clone())
            },
            |(mut s, keys)| {
                for k in keys {
                    s.add(k);
                }
                black_box(s)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_contains_hit(c: &mut Criterion) {
    c.bench_function("linear_hash_set_contains_hit", |b| {
        let (s, keys) = filled(7, 20_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(s.contains(k));
        })
    });
}

fn bench_contains_miss(c: &mut Criterion) {
    c.bench_function("linear_hash_set_contains_miss", |b| {
        let (s, _) = filled(11, 10_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in set
            let k = key(miss.next().unwrap());
            black_box(s.contains(&k));
        })
    });
}

fn bench_remove_add_churn(c: &mut Criterion) {
    c.bench_function("linear_hash_set_remove_add_churn", |b| {
        let (mut s, keys) = filled(13, 10_000);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(s.remove(k));
            black_box(s.add(k.clone()));
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("linear_hash_set_iter_10k", |b| {
        let (s, _) = filled(17, 10_000);
        b.iter(|| black_box(s.iter().map(String::len).sum::<usize>()))
    });
}

// Integer keys under both hashing modes, to compare layouts.
fn bench_hashing_modes(c: &mut Criterion) {
    for (name, mode) in [
        ("linear_hash_set_u64_randomized", HashingMode::Randomized),
        ("linear_hash_set_u64_deterministic", HashingMode::Deterministic),
    ] {
        c.bench_function(name, |b| {
            let keys: Vec<u64> = lcg(23).take(10_000).collect();
            b.iter_batched(
                || {
                    LinearHashSet::<u64>::with_config(SetConfig::new().with_hashing(mode))
                        .expect("default config is valid")
                },
                |mut s| {
                    s.add_all(keys.iter().copied());
                    black_box(s)
                },
                BatchSize::SmallInput,
            )
        });
    }
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
    targets = bench_add, bench_add_presized, bench_contains_hit, bench_contains_miss,
        bench_remove_add_churn, bench_iterate, bench_hashing_modes
}
criterion_main!(benches);
