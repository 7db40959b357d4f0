//! Benchmarks for blocksplit.
//!
//! Run with:
//!     cargo bench

use std::io::Cursor;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use blocksplit::{HashConfig, NamedSource, SplitConfig, Splitter};

fn pattern(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i * 7 + 13) as u8).collect()
}

fn bench_split_reader(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_reader");
    let size = 16 * 1024 * 1024;
    let data = pattern(size);

    group.throughput(Throughput::Bytes(size as u64));
    for block_size in [64 * 1024, 1024 * 1024, 4 * 1024 * 1024] {
        group.bench_with_input(
            format!("block_{}k", block_size / 1024),
            &data,
            |b, data| {
                let splitter = Splitter::with_block_size(block_size).unwrap();
                b.iter(|| {
                    let source = NamedSource::new("bench.bin", size as u64, Cursor::new(black_box(data)));
                    let mut count = 0;
                    for block in splitter.split(source).unwrap() {
                        black_box(block.unwrap());
                        count += 1;
                    }
                    black_box(count)
                });
            },
        );
    }

    group.finish();
}

fn bench_split_bytes(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_bytes");
    let size = 16 * 1024 * 1024;
    let data = bytes::Bytes::from(pattern(size));

    group.throughput(Throughput::Bytes(size as u64));

    // Zero-copy slicing only
    group.bench_function("no_hash", |b| {
        let splitter = Splitter::with_block_size(1024 * 1024).unwrap();
        b.iter(|| {
            let blocks = splitter.split_bytes("bench.bin", black_box(data.clone())).unwrap();
            black_box(blocks.len())
        });
    });

    // Slicing plus a digest per block
    group.bench_function("blake3", |b| {
        let config = SplitConfig::new(1024 * 1024)
            .unwrap()
            .with_hash_config(HashConfig::enabled());
        let splitter = Splitter::new(config);
        b.iter(|| {
            let blocks = splitter.split_bytes("bench.bin", black_box(data.clone())).unwrap();
            black_box(blocks.len())
        });
    });

    group.finish();
}

fn bench_manifest(c: &mut Criterion) {
    let splitter = Splitter::default();

    c.bench_function("manifest_1tb", |b| {
        b.iter(|| {
            let manifest = splitter.manifest("huge.bin", black_box(1 << 40)).unwrap();
            black_box(manifest.block_ids().count())
        });
    });
}

criterion_group!(benches, bench_split_reader, bench_split_bytes, bench_manifest);
criterion_main!(benches);
