//! Benchmarks for the temporal feature transform.
//!
//! Run with: `cargo bench -p data-processing`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use data_processing::{write_records, RawRecord, Split, TemporalTransformer};

/// Hourly demand over an 8x8 grid with shuffled timestamps.
fn create_records(hours: i64) -> Vec<RawRecord> {
    let mut records = Vec::with_capacity((hours * 64) as usize);
    for time in 0..hours {
        for cell in 0..64 {
            records.push(RawRecord {
                time: (time * 7919) % hours,
                row: cell / 8,
                col: cell % 8,
                demand: (time + cell) % 50,
            });
        }
    }
    records
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform_records");
    let transformer = TemporalTransformer::new(-8);

    for hours in [24_i64, 24 * 7, 24 * 30] {
        let records = create_records(hours);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hours), &records, |b, records| {
            b.iter(|| {
                transformer
                    .transform_records(Split::Train, black_box(records.clone()))
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_write(c: &mut Criterion) {
    let processed = TemporalTransformer::new(0)
        .transform_records(Split::Train, create_records(24 * 30))
        .unwrap();

    c.bench_function("write_records_month", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(processed.len() * 16);
            write_records(&mut out, black_box(&processed)).unwrap();
            out
        })
    });
}

criterion_group!(benches, bench_transform, bench_write);
criterion_main!(benches);
