//! Benchmark – word-at-a-time search and compare against `core`.
#![allow(missing_docs)]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use zslice::{ByteSlice, CharSlice, mem};

/// A deterministic haystack of `len` bytes of mixed ASCII and multi-byte
/// text, with `needle` appended so every search succeeds at the very end.
fn make_haystack(len: usize, needle: &str) -> String {
    const FILLER: &str = "lorem ipsum dolor sit amet, naïve café – ";
    let mut s = String::with_capacity(len + needle.len());
    while s.len() + FILLER.len() <= len {
        s.push_str(FILLER);
    }
    s.push_str(needle);
    s
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    for &len in &[64usize, 4_096, 262_144] {
        let haystack = make_haystack(len, "needle");
        group.throughput(Throughput::Bytes(haystack.len() as u64));
        group.bench_with_input(BenchmarkId::new("zslice_byte", len), &haystack, |b, h| {
            b.iter(|| black_box(ByteSlice::from(h.as_str()).find(black_box("needle"))));
        });
        group.bench_with_input(BenchmarkId::new("zslice_char", len), &haystack, |b, h| {
            b.iter(|| black_box(CharSlice::new(h).find(black_box("needle"))));
        });
        group.bench_with_input(BenchmarkId::new("str", len), &haystack, |b, h| {
            b.iter(|| black_box(h.find(black_box("needle"))));
        });
    }
    group.finish();
}

fn bench_find_byte(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_byte");
    for &len in &[64usize, 4_096, 262_144] {
        let mut haystack = vec![b'a'; len];
        haystack[len - 1] = b'z';
        group.throughput(Throughput::Bytes(len as u64));
        group.bench_with_input(BenchmarkId::new("forward", len), &haystack, |b, h| {
            b.iter(|| black_box(mem::find_byte(black_box(h), b'z')));
        });
        group.bench_with_input(BenchmarkId::new("iter_position", len), &haystack, |b, h| {
            b.iter(|| black_box(black_box(h).iter().position(|&x| x == b'z')));
        });
        group.bench_with_input(BenchmarkId::new("reverse", len), &haystack, |b, h| {
            b.iter(|| black_box(mem::rfind_byte(black_box(&h[1..]), b'a')));
        });
    }
    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("compare");
    let a = make_haystack(65_536, "x");
    let b = make_haystack(65_536, "y");
    group.throughput(Throughput::Bytes(a.len() as u64));
    group.bench_function("zslice", |bench| {
        bench.iter(|| black_box(mem::compare(black_box(a.as_bytes()), black_box(b.as_bytes()))));
    });
    group.bench_function("slice_ord", |bench| {
        bench.iter(|| black_box(black_box(a.as_bytes()).cmp(black_box(b.as_bytes()))));
    });
    group.finish();
}

fn bench_chars(c: &mut Criterion) {
    let text = make_haystack(65_536, "");
    let mut group = c.benchmark_group("chars");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("validated", |b| {
        b.iter(|| black_box(CharSlice::new(black_box(&text)).char_count()));
    });
    group.bench_function("unchecked", |b| {
        b.iter(|| black_box(CharSlice::new(black_box(&text)).chars_unchecked().count()));
    });
    group.bench_function("str_chars", |b| {
        b.iter(|| black_box(black_box(&text).chars().count()));
    });
    group.finish();
}

fn criterion() -> Criterion {
    let mut c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c = c
            .warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10);
    } else {
        c = c
            .warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5));
    }
    c
}

criterion_group! { name = benches; config = criterion(); targets = bench_find, bench_find_byte, bench_compare, bench_chars }
criterion_main!(benches);
