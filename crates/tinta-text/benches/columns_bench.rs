//! Benchmarks for column measurement, tokenization and styled slicing.
//!
//! Run with: cargo bench -p tinta-text

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tinta_text::{AnsiString, TokenCache, columns, tokenize, wrap_lines};

// =============================================================================
// Test Data
// =============================================================================

fn ascii_text(len: usize) -> String {
    "The quick brown fox jumps over the lazy dog. "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn mixed_text(len: usize) -> String {
    "Hello \u{4E16}\u{754C}! e\u{0301}t\u{00E9} \u{1F600} "
        .chars()
        .cycle()
        .take(len)
        .collect()
}

fn styled_text(words: usize) -> String {
    (0..words)
        .map(|i| match i % 3 {
            0 => format!("\x1b[1mword{i}\x1b[22m "),
            1 => format!("\x1b[38;5;{}mword{i}\x1b[39m ", i % 256),
            _ => format!("word{i} "),
        })
        .collect()
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("columns");
    for len in [10, 100, 1000, 10000] {
        let ascii = ascii_text(len);
        group.throughput(Throughput::Bytes(ascii.len() as u64));
        group.bench_with_input(BenchmarkId::new("ascii", len), &ascii, |b, text| {
            b.iter(|| black_box(columns(text)))
        });
        let mixed = mixed_text(len);
        group.throughput(Throughput::Bytes(mixed.len() as u64));
        group.bench_with_input(BenchmarkId::new("mixed", len), &mixed, |b, text| {
            b.iter(|| black_box(columns(text)))
        });
    }
    group.finish();
}

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize");
    for words in [10, 100, 1000] {
        let text = styled_text(words);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("direct", words), &text, |b, text| {
            b.iter(|| black_box(tokenize(text)))
        });
        let cache = TokenCache::new();
        group.bench_with_input(BenchmarkId::new("cached", words), &text, |b, text| {
            b.iter(|| black_box(cache.tokenize(text)))
        });
    }
    group.finish();
}

fn bench_styled_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("ansi_string");
    let cache = TokenCache::new();
    let text = AnsiString::with_cache(&styled_text(200), &cache);
    let half = text.length() / 2;

    group.bench_function("sub_sequence", |b| {
        b.iter(|| black_box(text.sub_sequence(half / 2, half + half / 2)))
    });
    group.bench_function("wrap_lines/40", |b| {
        b.iter(|| black_box(text.wrap_lines(40)))
    });
    group.bench_function("concat", |b| b.iter(|| black_box(&text + &text)));
    group.finish();
}

fn bench_plain_wrap(c: &mut Criterion) {
    let text = mixed_text(5000);
    c.bench_function("wrap_lines/plain/80", |b| {
        b.iter(|| black_box(wrap_lines(&text, 80)))
    });
}

criterion_group!(
    benches,
    bench_columns,
    bench_tokenize,
    bench_styled_operations,
    bench_plain_wrap
);
criterion_main!(benches);
