//! Benchmarks for animation export.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use led_cube_animator::{
    AnimationDocument, CubeDimensions, ScanOrder,
    encode::{parse_snapshot, to_snapshot, to_source_table},
};

fn build_document(size: usize, frames: usize) -> AnimationDocument {
    let dims = CubeDimensions::new(size, size, size).unwrap();
    let mut doc = AnimationDocument::new(dims, dims.min_duration_ms().max(100)).unwrap();
    for i in 1..frames {
        doc.insert_frame(i - 1, true).unwrap();
        let frame = doc.frame_mut(i).unwrap();
        frame.set_slice(i % size, true).unwrap();
    }
    doc
}

fn bench_source_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("source_table");

    for size in [3, 4, 8, 16] {
        let doc = build_document(size, 32);
        for order in [ScanOrder::DepthFirst, ScanOrder::HeightFirst] {
            group.bench_with_input(
                BenchmarkId::new(format!("{order:?}"), size),
                &doc,
                |b, doc| b.iter(|| to_source_table(black_box(doc), order)),
            );
        }
    }

    group.finish();
}

fn bench_snapshot_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_roundtrip");

    for size in [3, 8, 16] {
        let doc = build_document(size, 32);
        group.bench_with_input(BenchmarkId::from_parameter(size), &doc, |b, doc| {
            b.iter(|| {
                let text = to_snapshot(black_box(doc)).unwrap();
                parse_snapshot(&text).unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_source_table, bench_snapshot_roundtrip);
criterion_main!(benches);
