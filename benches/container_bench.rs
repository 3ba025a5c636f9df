use atomic_slot::{ArrayMap, ArrayVec, BitSet, MinHeap};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn bench_array_vec_fill_drain(c: &mut Criterion) {
    c.bench_function("array_vec_fill_drain_64", |b| {
        b.iter_batched(
            ArrayVec::<u64, 64>::new,
            |mut vec| {
                for x in lcg(1).take(64) {
                    vec.push(x).unwrap();
                }
                while let Some(x) = vec.pop() {
                    black_box(x);
                }
                vec
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_array_map_lookup(c: &mut Criterion) {
    c.bench_function("array_map_get_hit_16", |b| {
        let mut map = ArrayMap::<u64, u64, 16>::new();
        let keys: Vec<u64> = lcg(7).take(16).collect();
        for (i, &k) in keys.iter().enumerate() {
            map.insert(k, i as u64).unwrap();
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(map.get(k));
        })
    });
}

fn bench_bit_set_insert_iter(c: &mut Criterion) {
    c.bench_function("bit_set_insert_iter_256", |b| {
        b.iter_batched(
            BitSet::<[usize; 4]>::new,
            |mut set| {
                for x in lcg(11).take(128) {
                    set.insert((x % 256) as usize);
                }
                let sum: usize = set.iter().sum();
                black_box((sum, set))
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_min_heap_push_pop(c: &mut Criterion) {
    c.bench_function("min_heap_push_pop_1k", |b| {
        b.iter_batched(
            || MinHeap::with_capacity(1024),
            |mut heap| {
                for x in lcg(13).take(1024) {
                    heap.push((), x).unwrap();
                }
                while let Some(x) = heap.pop_with_priority().unwrap() {
                    black_box(x.1);
                }
                heap
            },
            BatchSize::SmallInput,
        )
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
    targets = bench_array_vec_fill_drain, bench_array_map_lookup,
        bench_bit_set_insert_iter, bench_min_heap_push_pop
}
criterion_main!(benches);
