//! Performance benchmarks for the derivation pipeline and snapshot codec.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use cradle_ledger_core::{
    hash, Bytes32, ChildId, EncryptedRecord, LedgerSnapshot, NftId, Nonce, RoleCredential,
    StorageLink, WrappedKey,
};

fn text(s: &str) -> Bytes32 {
    Bytes32::from_text(s).unwrap()
}

// =============================================================================
// HASH DERIVATIONS
// =============================================================================

fn bench_derive_nft_id(c: &mut Criterion) {
    let firstname = text("Ada");
    let lastname = text("Lovelace");
    let email = text("ada@example.org");

    c.bench_function("derive_nft_id", |b| {
        b.iter(|| {
            black_box(hash::derive_nft_id(
                black_box(&firstname),
                black_box(&lastname),
                black_box(&email),
            ))
        })
    });
}

fn bench_derive_child_id(c: &mut Criterion) {
    let name = text("Baby");
    let birth_date = text("2024-01-01");
    let gender = text("female");
    let nonce = Nonce::from_bytes([7u8; 32]);

    c.bench_function("derive_child_id", |b| {
        b.iter(|| {
            black_box(hash::derive_child_id(
                black_box(&name),
                black_box(&birth_date),
                black_box(&gender),
                black_box(&nonce),
            ))
        })
    });
}

fn bench_evolve_nonce(c: &mut Criterion) {
    let nonce = Nonce::from_bytes([7u8; 32]);

    c.bench_function("evolve_nonce", |b| {
        b.iter(|| black_box(hash::evolve_nonce(black_box(&nonce), black_box(42))))
    });
}

fn bench_nonce_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("nonce_chain");

    for len in [10u64, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| {
                let mut nonce = Nonce::from_bytes([7u8; 32]);
                for round in 1..=len {
                    nonce = hash::evolve_nonce(&nonce, round);
                }
                black_box(nonce)
            })
        });
    }

    group.finish();
}

// =============================================================================
// SNAPSHOT CODEC
// =============================================================================

fn populated_snapshot(entries: u64) -> LedgerSnapshot {
    let mut snapshot = LedgerSnapshot::genesis(Nonce::from_bytes([1u8; 32]));
    snapshot.round = entries * 2;

    for i in 0..entries {
        let mut key = [0u8; 32];
        key[..8].copy_from_slice(&i.to_le_bytes());

        snapshot.credentials.insert(
            NftId::from_bytes(key),
            RoleCredential::new(text("guardian"), text("2030-01-01")),
        );
        snapshot.records.insert(
            ChildId::from_bytes(key),
            EncryptedRecord::new(
                ChildId::from_bytes(key),
                StorageLink::from_bytes([0xA5; 128]),
                WrappedKey::from_bytes([0x5A; 128]),
            ),
        );
    }

    snapshot
}

fn bench_snapshot_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_encode");

    for entries in [10u64, 100, 1000] {
        let snapshot = populated_snapshot(entries);
        group.bench_with_input(
            BenchmarkId::from_parameter(entries),
            &snapshot,
            |b, snapshot| b.iter(|| black_box(snapshot.to_cbor().unwrap())),
        );
    }

    group.finish();
}

fn bench_snapshot_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_decode");

    for entries in [10u64, 100, 1000] {
        let bytes = populated_snapshot(entries).to_cbor().unwrap();
        group.bench_with_input(
            BenchmarkId::from_parameter(entries),
            &bytes,
            |b, bytes| b.iter(|| black_box(LedgerSnapshot::from_cbor(bytes).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(
    derivation_benches,
    bench_derive_nft_id,
    bench_derive_child_id,
    bench_evolve_nonce,
    bench_nonce_chain
);

criterion_group!(codec_benches, bench_snapshot_encode, bench_snapshot_decode);

criterion_main!(derivation_benches, codec_benches);
