use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use richmap::{DynMap, RichMap};

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_get_or_insert(c: &mut Criterion) {
    c.bench_function("richmap_get_or_insert_10k", |b| {
        b.iter_batched(
            RichMap::<String, u64>::new,
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    // Half of the keys repeat, exercising both arms.
                    let k = key(x % 5_000);
                    black_box(*m.get_or_insert(k, i as u64));
                }
                m
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_filter_by_value(c: &mut Criterion) {
    let map: RichMap<String, u64> = lcg(7).take(10_000).map(|x| (key(x), x)).collect();
    c.bench_function("richmap_filter_by_value_10k", |b| {
        b.iter(|| black_box(map.filter_by_value(|v| v % 2 == 0)))
    });
}

fn bench_filter_value_type(c: &mut Criterion) {
    let mut map = DynMap::new();
    for (i, x) in lcg(13).take(10_000).enumerate() {
        if i % 2 == 0 {
            map.insert_dyn(key(x), x);
        } else {
            map.insert_dyn(key(x), x as f64);
        }
    }
    c.bench_function("richmap_filter_value_type_10k", |b| {
        b.iter(|| black_box(map.filter_value_type::<u64>()))
    });
}

fn bench_entry_sequence(c: &mut Criterion) {
    let map: RichMap<String, u64> = lcg(29).take(10_000).map(|x| (key(x), x)).collect();
    c.bench_function("richmap_entry_sequence_10k", |b| {
        b.iter(|| {
            let total: u64 = map.entry_sequence().map(|e| *e.value()).sum();
            black_box(total)
        })
    });
}

criterion_group!(
    benches,
    bench_get_or_insert,
    bench_filter_by_value,
    bench_filter_value_type,
    bench_entry_sequence
);
criterion_main!(benches);
