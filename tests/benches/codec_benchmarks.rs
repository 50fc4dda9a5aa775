//! # Record Codec Benchmarks
//!
//! | Record | Format | Decoder |
//! |--------|--------|---------|
//! | holder | 24 bytes, little-endian | `decode_holder` |
//! | approved | 89 bytes, little-endian | `decode_approved` |
//! | token | 5 comma-delimited fields | `decode_token` |
//! | request | 5 comma-delimited fields | `decode_request` |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::json;

use ndpc_client::codec::{
    decode_approved, decode_holder, decode_id_list, decode_request, decode_token, encode_holder,
};

const PRODUCER: &str = "95dcc50ad49351dd97aab4678d9926de18981ab611903c145341df252300e88a";
const PUBLISHER: &str = "8e11ebbcdf47ecc0fcdf190882a1c25502a4ee17b1ebf49df0c076478bbcaf7d";

fn bench_byte_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("byte-records");

    let holder = encode_holder(1000, 3600, 1);
    group.bench_function("decode_holder", |b| {
        b.iter(|| decode_holder(black_box(&holder)))
    });

    let approved = format!(
        "{}{}{}{}{}{}",
        hex::encode(0u64.to_le_bytes()),
        hex::encode(50u64.to_le_bytes()),
        PUBLISHER,
        PRODUCER,
        hex::encode(1u64.to_le_bytes()),
        "0a"
    );
    group.bench_function("decode_approved", |b| {
        b.iter(|| decode_approved(black_box(&approved)))
    });

    group.finish();
}

fn bench_text_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("text-records");

    let token = "good3,uri-abc,checksum-xyz,10000000000,5";
    group.bench_function("decode_token", |b| b.iter(|| decode_token(black_box(token))));

    let request = format!("0,100,10,{PRODUCER},{PUBLISHER}");
    group.bench_function("decode_request", |b| {
        b.iter(|| decode_request(black_box(&request)))
    });

    for size in [10usize, 100, 1000] {
        let ids = json!((0..size as u64).collect::<Vec<_>>());
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("decode_id_list", size), &ids, |b, ids| {
            b.iter(|| decode_id_list(black_box(ids)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_byte_records, bench_text_records);
criterion_main!(benches);
