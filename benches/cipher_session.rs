use criterion::{criterion_group, criterion_main, Criterion};
use rsa_keytool::prelude::*;
use rsa_keytool::RsaCryptoSystem;
use std::hint::black_box;

fn session(policy: CipherHandlePolicy, transformation: &str) -> CipherSession {
    let (public_key, private_key) = RsaCryptoSystem::generate_keypair(2048).unwrap();
    CipherSession::builder()
        .algorithm(transformation)
        .key_size(2048)
        .public_key(public_key)
        .private_key(private_key)
        .handle_policy(policy)
        .build()
        .unwrap()
}

fn bench_handle_policies(c: &mut Criterion) {
    let data = vec![0u8; 245];
    for (label, policy) in [
        ("per-call", CipherHandlePolicy::PerCall),
        ("session-cached", CipherHandlePolicy::SessionCached),
    ] {
        let session = session(policy, "RSA/ECB/PKCS1Padding");
        c.bench_function(&format!("CipherSession {} encrypt 245B", label), |b| {
            b.iter(|| session.encrypt_bytes(black_box(&data)).unwrap());
        });
        let ciphertext = session.encrypt_bytes(&data).unwrap();
        c.bench_function(&format!("CipherSession {} decrypt 245B", label), |b| {
            b.iter(|| session.decrypt_bytes(black_box(&ciphertext)).unwrap());
        });
    }
}

fn bench_oaep(c: &mut Criterion) {
    let session = session(CipherHandlePolicy::PerCall, "RSA/ECB/OAEPWithSHA-256AndMGF1Padding");
    let message = "hello youtube.";
    c.bench_function("CipherSession OAEP string roundtrip", |b| {
        b.iter(|| {
            let ciphertext = session.encrypt_string_to_base64(black_box(message)).unwrap();
            session.decrypt_base64_string(&ciphertext).unwrap()
        });
    });
}

fn bench_key_generation(c: &mut Criterion) {
    let service = KeyPairService::builder().key_size(1024).build().unwrap();
    let mut group = c.benchmark_group("KeyPairService");
    group.sample_size(10);
    group.bench_function("generate 1024-bit", |b| {
        b.iter(|| service.generate_key_pair().unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_handle_policies, bench_oaep, bench_key_generation);
criterion_main!(benches);
