//! CRC-32 throughput benchmarks.
//!
//! Covers the byte loop / slicing-by-8 threshold and incremental updates in
//! the chunk sizes the gzip driver feeds by default.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxigz_core::crc::Crc32;
use std::hint::black_box;

fn text_like(size: usize) -> Vec<u8> {
    let text = b"The quick brown fox jumps over the lazy dog. ";
    text.iter().copied().cycle().take(size).collect()
}

fn bench_crc32_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_sizes");

    let sizes = [
        ("15B", 15),
        ("16B", 16),
        ("256B", 256),
        ("4KB", 4 * 1024),
        ("64KB", 64 * 1024),
        ("1MB", 1024 * 1024),
    ];

    for (size_name, size) in sizes {
        let data = text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| black_box(Crc32::compute(black_box(data))));
        });
    }

    group.finish();
}

fn bench_crc32_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_incremental");
    let data = text_like(256 * 1024);
    group.throughput(Throughput::Bytes(data.len() as u64));

    for chunk in [7usize, 64, 1024, 32 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(chunk), &chunk, |b, &chunk| {
            b.iter(|| {
                let mut crc = Crc32::new();
                for part in data.chunks(chunk) {
                    crc.update(black_box(part));
                }
                black_box(crc.finalize())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_crc32_sizes, bench_crc32_incremental);
criterion_main!(benches);
