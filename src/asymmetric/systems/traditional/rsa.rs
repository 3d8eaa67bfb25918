//! `RsaCryptoSystem` 提供了基于 RSA 的非对称加解密功能，
//! 支持 PKCS#1 v1.5 与 OAEP (SHA-256) 两种填充方案。

use crate::asymmetric::algorithm::Padding;
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::common::errors::{Error, Result};
use crate::common::utils::ZeroizingVec;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey};
use rsa::rand_core::OsRng as RsaOsRng;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, Pkcs1v15Encrypt, RsaPrivateKey, RsaPublicKey};
use sha2::Sha256;

/// 支持的最小密钥长度（位）
pub const MIN_KEY_BITS: usize = 512;
/// 支持的最大密钥长度（位），更大的模数无法通过公钥解析
pub const MAX_KEY_BITS: usize = 4096;

/// RSA加密系统实现
pub struct RsaCryptoSystem;

impl AsymmetricCryptographicSystem for RsaCryptoSystem {
    type PublicKey = RsaPublicKey;
    type PrivateKey = RsaPrivateKey;
    type Padding = Padding;

    const NAME: &'static str = "RSA";

    fn generate_keypair(key_size: usize) -> Result<(Self::PublicKey, Self::PrivateKey)> {
        if !(MIN_KEY_BITS..=MAX_KEY_BITS).contains(&key_size) {
            return Err(Error::InvalidKeySize { bits: key_size });
        }

        let mut rsa_rng = RsaOsRng;
        let private_key = RsaPrivateKey::new(&mut rsa_rng, key_size)
            .map_err(|e| Error::CryptoOperation(format!("failed to generate RSA key: {}", e)))?;
        let public_key = RsaPublicKey::from(&private_key);

        Ok((public_key, private_key))
    }

    fn encrypt(
        public_key: &Self::PublicKey,
        padding: Self::Padding,
        plaintext: &[u8],
    ) -> Result<Vec<u8>> {
        let limit = Self::max_plaintext_len(public_key, padding);
        if plaintext.len() > limit {
            return Err(Error::CryptoOperation(format!(
                "input of {} bytes exceeds the {} byte limit of a {}-bit key with {}",
                plaintext.len(),
                limit,
                Self::key_bits(public_key),
                padding
            )));
        }

        let mut rng = RsaOsRng;
        let ciphertext = match padding {
            Padding::Pkcs1v15 => public_key.encrypt(&mut rng, Pkcs1v15Encrypt, plaintext),
            Padding::OaepSha256 => public_key.encrypt(&mut rng, Oaep::new::<Sha256>(), plaintext),
        };

        ciphertext.map_err(|e| Error::CryptoOperation(format!("RSA encryption failed: {}", e)))
    }

    fn decrypt(
        private_key: &Self::PrivateKey,
        padding: Self::Padding,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>> {
        if ciphertext.len() != private_key.size() {
            return Err(Error::CryptoOperation(format!(
                "ciphertext is {} bytes, expected {} for this key",
                ciphertext.len(),
                private_key.size()
            )));
        }

        let plaintext = match padding {
            Padding::Pkcs1v15 => private_key.decrypt(Pkcs1v15Encrypt, ciphertext),
            Padding::OaepSha256 => private_key.decrypt(Oaep::new::<Sha256>(), ciphertext),
        };

        plaintext.map_err(|e| Error::CryptoOperation(format!("RSA decryption failed: {}", e)))
    }

    fn max_plaintext_len(public_key: &Self::PublicKey, padding: Self::Padding) -> usize {
        public_key.size().saturating_sub(padding.overhead())
    }

    fn key_bits(public_key: &Self::PublicKey) -> usize {
        public_key.n().bits()
    }

    fn export_public_key(public_key: &Self::PublicKey) -> Result<Vec<u8>> {
        let der = public_key
            .to_public_key_der()
            .map_err(|e| Error::KeyFormat(format!("failed to encode RSA public key: {}", e)))?;
        Ok(der.as_bytes().to_vec())
    }

    fn export_private_key(private_key: &Self::PrivateKey) -> Result<ZeroizingVec> {
        let der = private_key
            .to_pkcs8_der()
            .map_err(|e| Error::KeyFormat(format!("failed to encode RSA private key: {}", e)))?;
        Ok(ZeroizingVec(der.as_bytes().to_vec()))
    }

    fn import_public_key(der: &[u8]) -> Result<Self::PublicKey> {
        RsaPublicKey::from_public_key_der(der).map_err(|e| {
            Error::KeyFormat(format!(
                "not an X.509 SubjectPublicKeyInfo RSA public key: {}",
                e
            ))
        })
    }

    fn import_private_key(der: &[u8]) -> Result<Self::PrivateKey> {
        RsaPrivateKey::from_pkcs8_der(der).map_err(|e| {
            if RsaPrivateKey::from_pkcs1_der(der).is_ok() {
                Error::KeyFormat(
                    "PKCS#1 RSA private key given, convert it to PKCS#8 first".to_string(),
                )
            } else {
                Error::KeyFormat(format!("not a PKCS#8 RSA private key: {}", e))
            }
        })
    }
}
