// Recovery and derivation benchmarks.
//
// Compares the hand-written curve recovery with k256's, and times the
// WIF decode and address derivation steps around them.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use opendime_keys::codec::wif;
use opendime_keys::config::{Chain, BITCOIN};
use opendime_keys::recovery::{
    signed_message_digest, CompactSignature, K256Recovery, KeyRecovery, ManualRecovery,
};
use opendime_keys::{AddressSet, PrivateKeyScalar};

const SIGNATURE: &str =
    "HwPlEOxTxs62ruMHZvamv0wmUlbbaY/2ZSqw9Hpdw+FWfgXuSxQ9x55ceSiFyvnlpiZjt+KIhSYnhGnCv8iDe5o=";

fn bench_recovery(c: &mut Criterion) {
    let digest = signed_message_digest(&BITCOIN, b"Hello World!");
    let signature = CompactSignature::from_base64(SIGNATURE).unwrap();

    let mut group = c.benchmark_group("recovery");
    group.bench_function("manual", |b| {
        b.iter(|| ManualRecovery.recover(black_box(&digest), black_box(&signature)));
    });
    group.bench_function("k256", |b| {
        b.iter(|| K256Recovery.recover(black_box(&digest), black_box(&signature)));
    });
    group.finish();
}

fn bench_wif_decode(c: &mut Criterion) {
    let prefixes = Chain::all_wif_prefixes();
    c.bench_function("wif/decode", |b| {
        b.iter(|| {
            wif::decode(
                black_box("L5g3omnu8BYUS5zUA74AW1eSbZ1xx72HzSVgJcejsvMTn3P579qd"),
                &prefixes,
            )
        });
    });
}

fn bench_derivation(c: &mut Criterion) {
    let secret = PrivateKeyScalar::from_hex(
        "dc192045a9261a395445d220890d0969fd7dd2bacec12b9ab3c9827cb0df7bf3",
    )
    .unwrap();
    let pubkey = secret.public_key();

    c.bench_function("derive/public_key", |b| {
        b.iter(|| black_box(&secret).public_key());
    });
    c.bench_function("derive/address_set", |b| {
        b.iter(|| AddressSet::derive(black_box(&pubkey)));
    });
}

criterion_group!(benches, bench_recovery, bench_wif_decode, bench_derivation);
criterion_main!(benches);
