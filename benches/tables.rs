//! Benchmarks for sorting and serializing metadata tables.
//!
//! Builds a module with many fields, constants and custom attributes added in reverse
//! key order, then measures the sort pass and the `#~` stream writer.

extern crate cilmeta;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use cilmeta::prelude::*;
use std::hint::black_box;

const FIELDS: u32 = 20_000;

fn build_tables() -> MetadataTables {
    let mut tables = MetadataTables::new(ModuleRaw::new(1, 1));

    for rid in 1..=FIELDS {
        tables.field.add_row(FieldRaw {
            flags: 0x0016,
            name: rid,
            signature: 1,
        });
    }

    for rid in (1..=FIELDS).rev() {
        tables.constant.add_row(ConstantRaw {
            base: 0x08,
            parent: CodedIndex::new(CodedIndexType::HasConstant, TableId::Field, rid).unwrap(),
            value: 1,
        });
        tables.custom_attribute.add_row(CustomAttributeRaw {
            parent: CodedIndex::new(CodedIndexType::HasCustomAttribute, TableId::Field, rid)
                .unwrap(),
            constructor: CodedIndex::new(CodedIndexType::CustomAttributeType, TableId::MemberRef, 1)
                .unwrap(),
            value: 0,
        });
    }

    tables
}

/// Benchmark sorting reverse ordered Constant and CustomAttribute tables.
fn bench_sort(c: &mut Criterion) {
    c.bench_function("tables_sort_reversed", |b| {
        b.iter_batched(
            build_tables,
            |mut tables| {
                tables.sort();
                black_box(tables)
            },
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark writing the full `#~` stream, including the sort pass.
fn bench_write(c: &mut Criterion) {
    let heap_sizes = HeapSizes::empty();

    c.bench_function("tables_write_stream", |b| {
        b.iter_batched(
            build_tables,
            |mut tables| black_box(tables.write(heap_sizes).unwrap()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark building the heaps a typical module references.
fn bench_heaps(c: &mut Criterion) {
    c.bench_function("heaps_build", |b| {
        b.iter(|| {
            let mut strings = StringsHeapBuilder::new();
            let mut blobs = BlobHeapBuilder::new();
            for i in 0..2_000_u32 {
                strings.add(&format!("Field{}", i % 500)).unwrap();
                blobs.add(&i.to_le_bytes()).unwrap();
            }
            black_box((strings.len(), blobs.len()))
        });
    });
}

criterion_group!(benches, bench_sort, bench_write, bench_heaps);
criterion_main!(benches);
