//! Performance benchmarks for the CRC-32 implementation.
//!
//! Covers throughput across data sizes, data patterns, and the slicing-by-8
//! crossover at the 16-byte threshold.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use plainzip_core::crc::Crc32;
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod test_data {
    pub fn uniform(size: usize) -> Vec<u8> {
        vec![0xAA; size]
    }

    pub fn random(size: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(size);
        let mut seed: u64 = 0x123456789ABCDEF0;
        for _ in 0..size {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
            data.push((seed >> 32) as u8);
        }
        data
    }

    pub fn zeros(size: usize) -> Vec<u8> {
        vec![0; size]
    }

    pub fn text_like(size: usize) -> Vec<u8> {
        let text = b"The quick brown fox jumps over the lazy dog. ";
        let mut data = Vec::with_capacity(size);
        while data.len() < size {
            let remaining = size - data.len();
            let chunk_size = remaining.min(text.len());
            data.extend_from_slice(&text[..chunk_size]);
        }
        data
    }
}

mod data_sizes {
    pub const TINY: usize = 16; // threshold for slicing-by-8
    pub const SMALL: usize = 256;
    pub const MEDIUM: usize = 4 * 1024;
    pub const LARGE: usize = 64 * 1024;
    pub const XLARGE: usize = 1024 * 1024;
}

fn bench_crc32_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_sizes");

    let sizes = [
        ("16B", data_sizes::TINY),
        ("256B", data_sizes::SMALL),
        ("4KB", data_sizes::MEDIUM),
        ("64KB", data_sizes::LARGE),
        ("1MB", data_sizes::XLARGE),
    ];

    for (size_name, size) in sizes {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size_name), &data, |b, data| {
            b.iter(|| {
                let checksum = Crc32::compute(black_box(data));
                black_box(checksum);
            });
        });
    }

    group.finish();
}

fn bench_crc32_patterns(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_patterns");

    let patterns: [(&str, PatternGenerator); 4] = [
        ("uniform", test_data::uniform as PatternGenerator),
        ("random", test_data::random as PatternGenerator),
        ("zeros", test_data::zeros as PatternGenerator),
        ("text", test_data::text_like as PatternGenerator),
    ];

    let size = data_sizes::LARGE;

    for (pattern_name, generator) in patterns {
        let data = generator(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_name),
            &data,
            |b, data| {
                b.iter(|| {
                    let checksum = Crc32::compute(black_box(data));
                    black_box(checksum);
                });
            },
        );
    }

    group.finish();
}

fn bench_crc32_incremental(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc32_incremental");

    let size = data_sizes::LARGE;
    let data = test_data::text_like(size);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input(
        BenchmarkId::from_parameter("single_shot"),
        &data,
        |b, data| {
            b.iter(|| {
                let checksum = Crc32::compute(black_box(data));
                black_box(checksum);
            });
        },
    );

    for chunk_size in [256, 1024, 4096, 16384] {
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("chunks_{}", chunk_size)),
            &data,
            |b, data| {
                b.iter(|| {
                    let mut crc = Crc32::new();
                    for chunk in data.chunks(chunk_size) {
                        crc.update(black_box(chunk));
                    }
                    let checksum = crc.finalize();
                    black_box(checksum);
                });
            },
        );
    }

    group.finish();
}

fn bench_slicing_threshold(c: &mut Criterion) {
    let mut group = c.benchmark_group("slicing_threshold");

    for size in [8, 12, 16, 20, 32, 64, 128] {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("crc32", size), &data, |b, data| {
            b.iter(|| {
                let checksum = Crc32::compute(black_box(data));
                black_box(checksum);
            });
        });
    }

    group.finish();
}

fn bench_throughput_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("throughput_scaling");

    for size in [
        64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768, 65536,
    ] {
        let data = test_data::text_like(size);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}B", size)),
            &data,
            |b, data| {
                b.iter(|| {
                    let checksum = Crc32::compute(black_box(data));
                    black_box(checksum);
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_crc32_sizes,
    bench_crc32_patterns,
    bench_crc32_incremental,
    bench_slicing_threshold,
    bench_throughput_scaling,
);
criterion_main!(benches);
