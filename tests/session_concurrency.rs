//!
//! 同一个会话在多个线程间共享
//!

use std::sync::{Arc, OnceLock};
use std::thread;

use rsa::{RsaPrivateKey, RsaPublicKey};
use rsa_keytool::prelude::*;
use rsa_keytool::RsaCryptoSystem;

const THREADS: usize = 8;
const ROUNDS: usize = 16;

fn setup_keys() -> &'static (RsaPublicKey, RsaPrivateKey) {
    static KEYS: OnceLock<(RsaPublicKey, RsaPrivateKey)> = OnceLock::new();
    KEYS.get_or_init(|| RsaCryptoSystem::generate_keypair(1024).unwrap())
}

fn shared_session(policy: CipherHandlePolicy) -> Arc<CipherSession> {
    let (public_key, private_key) = setup_keys().clone();
    Arc::new(
        CipherSession::builder()
            .key_size(1024)
            .public_key(public_key)
            .private_key(private_key)
            .handle_policy(policy)
            .build()
            .unwrap(),
    )
}

fn hammer(session: Arc<CipherSession>) {
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                for round in 0..ROUNDS {
                    let message = format!("thread {t} round {round}");
                    let ciphertext = session.encrypt_string_to_base64(&message).unwrap();
                    assert_eq!(session.decrypt_base64_string(&ciphertext).unwrap(), message);

                    // 失败的调用不能影响其他线程
                    if round % 4 == 0 {
                        assert!(session.encrypt_bytes(&[0u8; 200]).is_err());
                        assert!(session.decrypt_bytes(&[0u8; 3]).is_err());
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_per_call_session_across_threads() {
    hammer(shared_session(CipherHandlePolicy::PerCall));
}

#[test]
fn test_session_cached_handles_across_threads() {
    hammer(shared_session(CipherHandlePolicy::SessionCached));
}

#[test]
fn test_ciphertexts_cross_between_policies() {
    let per_call = shared_session(CipherHandlePolicy::PerCall);
    let cached = shared_session(CipherHandlePolicy::SessionCached);

    let a = per_call.encrypt_bytes(b"from per-call").unwrap();
    let b = cached.encrypt_bytes(b"from cached").unwrap();
    assert_eq!(cached.decrypt_bytes(&a).unwrap(), b"from per-call");
    assert_eq!(per_call.decrypt_bytes(&b).unwrap(), b"from cached");
}

#[test]
fn test_key_pair_service_is_shared_read_only() {
    let service = Arc::new(KeyPairService::builder().key_size(512).build().unwrap());

    let pairs: Vec<KeyPair> = (0..4)
        .map(|_| {
            let service = Arc::clone(&service);
            thread::spawn(move || service.generate_key_pair().unwrap())
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for (i, a) in pairs.iter().enumerate() {
        for b in &pairs[i + 1..] {
            assert_ne!(a.public_key_der(), b.public_key_der());
        }
    }
}
