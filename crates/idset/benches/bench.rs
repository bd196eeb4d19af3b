use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use idset::{EncodeFlags, IdSet};

// Number of ids touched per benchmark iteration.
const TOTAL_IDS: u32 = 4096;

/// Every other id in `0..2 * TOTAL_IDS`: the most fragmented layout.
fn sparse() -> IdSet {
    IdSet::try_from_ids((0..TOTAL_IDS).map(|i| i * 2)).unwrap()
}

/// Benchmarks single-id mutation and lookup on contiguous and fragmented
/// sets.
fn benchmark_mutate(c: &mut Criterion) {
    let mut group = c.benchmark_group("mutate");
    group.throughput(Throughput::Elements(u64::from(TOTAL_IDS)));

    group.bench_function(format!("set/contiguous/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let mut set = IdSet::new();
            for id in 0..TOTAL_IDS {
                set.set(black_box(id)).unwrap();
            }
            black_box(set)
        });
    });

    group.bench_function(format!("set/sparse/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let mut set = IdSet::new();
            for id in 0..TOTAL_IDS {
                set.set(black_box(id * 2)).unwrap();
            }
            black_box(set)
        });
    });

    group.bench_function(format!("clear/split/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let mut set = IdSet::from_range(0, 2 * TOTAL_IDS).unwrap();
            for id in 0..TOTAL_IDS {
                set.clear(black_box(id * 2 + 1)).unwrap();
            }
            black_box(set)
        });
    });

    let set = sparse();
    group.bench_function(format!("test/sparse/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in 0..TOTAL_IDS {
                black_box(set.test(black_box(id)).unwrap());
            }
        });
    });

    group.finish();
}

/// Benchmarks walking a fragmented set with `next` and with the iterator.
fn benchmark_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(u64::from(TOTAL_IDS)));
    let set = sparse();

    group.bench_function(format!("next/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            let mut id = set.first();
            while id != idset::INVALID_ID {
                id = black_box(set.next(id));
            }
        });
    });

    group.bench_function(format!("iter/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for id in &set {
                black_box(id);
            }
        });
    });

    group.finish();
}

/// Benchmarks the RFC22 codec over fragmented and contiguous sets.
fn benchmark_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Elements(u64::from(TOTAL_IDS)));

    let set = sparse();
    let text = set.encode(EncodeFlags::RANGE);
    let list = IdSet::from_range(0, TOTAL_IDS - 1)
        .unwrap()
        .encode(EncodeFlags::empty());

    group.bench_function("encode/sparse", |b| {
        b.iter(|| black_box(set.encode(black_box(EncodeFlags::RANGE))));
    });
    group.bench_function("decode/sparse", |b| {
        b.iter(|| black_box(IdSet::decode(black_box(&text)).unwrap()));
    });
    group.bench_function("decode/list", |b| {
        b.iter(|| black_box(IdSet::decode(black_box(&list)).unwrap()));
    });

    group.finish();
}

/// Benchmarks set algebra between two interleaved fragmented sets.
fn benchmark_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");
    group.throughput(Throughput::Elements(u64::from(TOTAL_IDS)));

    let evens = sparse();
    let odds = IdSet::try_from_ids((0..TOTAL_IDS).map(|i| i * 2 + 1)).unwrap();
    let thirds = IdSet::try_from_ids((0..TOTAL_IDS).map(|i| i * 3)).unwrap();

    group.bench_function("union/interleaved", |b| {
        b.iter(|| black_box(black_box(&evens) | black_box(&odds)));
    });
    group.bench_function("intersect/overlapping", |b| {
        b.iter(|| black_box(black_box(&evens) & black_box(&thirds)));
    });
    group.bench_function("subtract/overlapping", |b| {
        b.iter(|| black_box(black_box(&evens) - black_box(&thirds)));
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_mutate,
    benchmark_iterate,
    benchmark_codec,
    benchmark_algebra,
);
criterion_main!(benches);
