//! Throughput benchmarks: lookups per second across all four index
//! designs, subscribed with the same synthetic workload the original
//! Go implementation used to compare its matcher variants (a mix of
//! fully-literal three-constituent topics and wildcard patterns at each
//! of the three positions, with query topics generated by substituting
//! a concrete digit for every `*` in a subscribed pattern).
//!
//! FAIR BENCHMARKING:
//! - Each variant is populated with the same `NUM_SUBS` subscriptions
//!   before any lookup is timed; population cost is a separate bench
//!   group, not amortized into the lookup numbers.
//! - Inverted Bitmap is seeded with exactly the topic universe the
//!   query set draws from, since it cannot answer outside it.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use topic_matcher::prelude::*;

const NUM_SUBS: usize = 1_000;
const NUM_MSGS: usize = 10_000;
const SEED: u64 = 0x746f7069635f6d61; // fixed, for reproducible benches

fn synthetic_workload() -> (Vec<String>, Vec<String>) {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut subs = Vec::with_capacity(NUM_SUBS);
    for i in 0..NUM_SUBS {
        let (a, b, c) = (rng.gen_range(0..10), rng.gen_range(0..10), rng.gen_range(0..10));
        let pattern = if i % 10 == 0 {
            format!("*.{b}.{c}")
        } else if i % 25 == 0 {
            format!("{a}.*.{c}")
        } else if i % 45 == 0 {
            format!("{a}.{b}.*")
        } else {
            format!("{a}.{b}.{c}")
        };
        subs.push(pattern);
    }

    let mut msgs = Vec::with_capacity(NUM_MSGS);
    for i in 0..NUM_MSGS {
        let pattern = &subs[i % NUM_SUBS];
        let digit = rng.gen_range(0..10).to_string();
        msgs.push(pattern.replacen('*', &digit, 1));
    }
    (subs, msgs)
}

fn populate(c: &mut Criterion) {
    topic_matcher::dev_tracing::init_tracing();
    let (subs, _) = synthetic_workload();
    let mut group = c.benchmark_group("populate");

    group.bench_function(BenchmarkId::new("hash", NUM_SUBS), |b| {
        b.iter(|| {
            let m = HashMatcher::new();
            for (i, sub) in subs.iter().enumerate() {
                m.subscribe(black_box(sub), i as u32).unwrap();
            }
        });
    });

    group.bench_function(BenchmarkId::new("trie", NUM_SUBS), |b| {
        b.iter(|| {
            let m = TrieMatcher::new();
            for (i, sub) in subs.iter().enumerate() {
                m.subscribe(black_box(sub), i as u32).unwrap();
            }
        });
    });

    group.bench_function(BenchmarkId::new("constituent_bitmap", NUM_SUBS), |b| {
        b.iter(|| {
            let m = ConstituentBitmapMatcher::new(3);
            for (i, sub) in subs.iter().enumerate() {
                m.subscribe(black_box(sub), i as u32).unwrap();
            }
        });
    });

    group.finish();
}

fn lookup(c: &mut Criterion) {
    let (subs, msgs) = synthetic_workload();

    let hash = HashMatcher::new();
    let trie = TrieMatcher::new();
    let cbitmap = ConstituentBitmapMatcher::new(3);
    let ibitmap = InvertedBitmapMatcher::new(msgs.iter().map(String::as_str));
    for (i, sub) in subs.iter().enumerate() {
        hash.subscribe(sub, i as u32).unwrap();
        trie.subscribe(sub, i as u32).unwrap();
        cbitmap.subscribe(sub, i as u32).unwrap();
        ibitmap.subscribe(sub, i as u32).unwrap();
    }

    let mut group = c.benchmark_group("lookup");
    group.throughput(criterion::Throughput::Elements(NUM_MSGS as u64));

    group.bench_function(BenchmarkId::new("hash", NUM_MSGS), |b| {
        b.iter(|| {
            for msg in &msgs {
                black_box(hash.lookup(black_box(msg)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("trie", NUM_MSGS), |b| {
        b.iter(|| {
            for msg in &msgs {
                black_box(trie.lookup(black_box(msg)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("constituent_bitmap", NUM_MSGS), |b| {
        b.iter(|| {
            for msg in &msgs {
                black_box(cbitmap.lookup(black_box(msg)));
            }
        });
    });

    group.bench_function(BenchmarkId::new("inverted_bitmap", NUM_MSGS), |b| {
        b.iter(|| {
            for msg in &msgs {
                black_box(ibitmap.lookup(black_box(msg)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, populate, lookup);
criterion_main!(benches);
