//! # 加解密会话
//!
//! `CipherSession` 由 [`CipherSessionBuilder`] 配置并构建，构建后只读。
//! 会话最多持有一个公钥（用于加密）和一个私钥（用于解密）。
//!
//! 句柄策略见 [`CipherHandlePolicy`]：默认每次调用都创建新的 [`Cipher`]，
//! 因此同一个会话可以直接在多个线程间共享；`SessionCached` 复用构建时创建的句柄，
//! 每次调用需要获取该句柄的锁。
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use rsa::pkcs8::LineEnding;
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, warn};

use crate::asymmetric::algorithm::{Algorithm, Padding, Transformation};
use crate::asymmetric::cipher::Cipher;
use crate::asymmetric::systems::traditional::RsaCryptoSystem;
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::codec::mime;
use crate::common::config::{CipherHandlePolicy, DEFAULT_ALGORITHM, DEFAULT_KEY_SIZE};
use crate::common::errors::{Error, KeyRole, Result};

/// Base64 密文使用 MIME 规定的换行符
const BASE64_LINE_ENDING: LineEnding = LineEnding::CRLF;

/// `CipherSession` 的构建器
///
/// 在调用 [`build`](Self::build) 之前不做任何校验。
pub struct CipherSessionBuilder {
    algorithm: String,
    key_size: usize,
    public_key: Option<RsaPublicKey>,
    private_key: Option<RsaPrivateKey>,
    handle_policy: CipherHandlePolicy,
}

impl Default for CipherSessionBuilder {
    fn default() -> Self {
        Self {
            algorithm: DEFAULT_ALGORITHM.to_string(),
            key_size: DEFAULT_KEY_SIZE,
            public_key: None,
            private_key: None,
            handle_policy: CipherHandlePolicy::default(),
        }
    }
}

impl CipherSessionBuilder {
    /// 转换名称，例如 `"RSA"` 或 `"RSA/ECB/OAEPWithSHA-256AndMGF1Padding"`
    pub fn algorithm(mut self, algorithm: impl Into<String>) -> Self {
        self.algorithm = algorithm.into();
        self
    }

    /// 预期的密钥长度（位），与实际密钥不一致时只记录警告
    pub fn key_size(mut self, key_size: usize) -> Self {
        self.key_size = key_size;
        self
    }

    pub fn public_key(mut self, public_key: RsaPublicKey) -> Self {
        self.public_key = Some(public_key);
        self
    }

    pub fn private_key(mut self, private_key: RsaPrivateKey) -> Self {
        self.private_key = Some(private_key);
        self
    }

    pub fn handle_policy(mut self, handle_policy: CipherHandlePolicy) -> Self {
        self.handle_policy = handle_policy;
        self
    }

    /// 解析转换名称；`SessionCached` 策略下为每个已设置的密钥创建句柄
    pub fn build(self) -> Result<CipherSession> {
        let transformation = Transformation::parse(&self.algorithm)?;

        let public_key = self.public_key.map(Arc::new);
        let private_key = self.private_key.map(Arc::new);

        if let Some(key) = &public_key {
            warn_on_size_mismatch(KeyRole::Public, RsaCryptoSystem::key_bits(key), self.key_size);
        }
        if let Some(key) = &private_key {
            warn_on_size_mismatch(KeyRole::Private, key.n().bits(), self.key_size);
        }

        // PerCall 在每次调用时才创建句柄
        let (encrypt_handle, decrypt_handle) = match self.handle_policy {
            CipherHandlePolicy::PerCall => (None, None),
            CipherHandlePolicy::SessionCached => (
                public_key.as_ref().map(|key| {
                    Mutex::new(Cipher::for_encryption(transformation, Arc::clone(key)))
                }),
                private_key.as_ref().map(|key| {
                    Mutex::new(Cipher::for_decryption(transformation, Arc::clone(key)))
                }),
            ),
        };

        debug!(
            %transformation,
            key_size = self.key_size,
            policy = ?self.handle_policy,
            has_public_key = public_key.is_some(),
            has_private_key = private_key.is_some(),
            "cipher session built"
        );

        Ok(CipherSession {
            transformation,
            key_size: self.key_size,
            handle_policy: self.handle_policy,
            public_key,
            private_key,
            encrypt_handle,
            decrypt_handle,
        })
    }
}

impl fmt::Debug for CipherSessionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSessionBuilder")
            .field("algorithm", &self.algorithm)
            .field("key_size", &self.key_size)
            .field("has_public_key", &self.public_key.is_some())
            .field("has_private_key", &self.private_key.is_some())
            .field("handle_policy", &self.handle_policy)
            .finish()
    }
}

fn warn_on_size_mismatch(role: KeyRole, actual_bits: usize, configured_bits: usize) {
    if actual_bits != configured_bits {
        warn!(
            %role,
            actual_bits,
            configured_bits,
            "key size differs from the configured key size"
        );
    }
}

/// 已构建的加解密会话
pub struct CipherSession {
    transformation: Transformation,
    key_size: usize,
    handle_policy: CipherHandlePolicy,
    public_key: Option<Arc<RsaPublicKey>>,
    private_key: Option<Arc<RsaPrivateKey>>,
    encrypt_handle: Option<Mutex<Cipher>>,
    decrypt_handle: Option<Mutex<Cipher>>,
}

impl CipherSession {
    pub fn builder() -> CipherSessionBuilder {
        CipherSessionBuilder::default()
    }

    pub fn algorithm(&self) -> Algorithm {
        self.transformation.algorithm()
    }

    pub fn padding(&self) -> Padding {
        self.transformation.padding()
    }

    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    /// 构建时配置的密钥长度（位）
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    pub fn handle_policy(&self) -> CipherHandlePolicy {
        self.handle_policy
    }

    pub fn public_key(&self) -> Option<&RsaPublicKey> {
        self.public_key.as_deref()
    }

    pub fn private_key(&self) -> Option<&RsaPrivateKey> {
        self.private_key.as_deref()
    }

    /// 单次加密的最大明文长度；没有公钥时返回 `None`
    pub fn max_plaintext_len(&self) -> Option<usize> {
        self.public_key
            .as_ref()
            .map(|key| RsaCryptoSystem::max_plaintext_len(key, self.padding()))
    }

    /// 用公钥加密，明文长度不能超过 [`max_plaintext_len`](Self::max_plaintext_len)
    pub fn encrypt_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let public_key = self
            .public_key
            .as_ref()
            .ok_or(Error::UnconfiguredKey(KeyRole::Public))?;

        match &self.encrypt_handle {
            Some(handle) => lock(handle).do_final(input),
            None => Cipher::for_encryption(self.transformation, Arc::clone(public_key)).do_final(input),
        }
    }

    /// 加密后以 MIME Base64 文本返回
    pub fn encrypt_bytes_to_base64(&self, input: &[u8]) -> Result<String> {
        let ciphertext = self.encrypt_bytes(input)?;
        Ok(mime::encode(&ciphertext, BASE64_LINE_ENDING))
    }

    /// 加密字符串的 UTF-8 字节
    pub fn encrypt_string(&self, input: &str) -> Result<Vec<u8>> {
        self.encrypt_bytes(input.as_bytes())
    }

    pub fn encrypt_string_to_base64(&self, input: &str) -> Result<String> {
        self.encrypt_bytes_to_base64(input.as_bytes())
    }

    /// 用私钥解密
    pub fn decrypt_bytes(&self, input: &[u8]) -> Result<Vec<u8>> {
        let private_key = self
            .private_key
            .as_ref()
            .ok_or(Error::UnconfiguredKey(KeyRole::Private))?;

        match &self.decrypt_handle {
            Some(handle) => lock(handle).do_final(input),
            None => Cipher::for_decryption(self.transformation, Arc::clone(private_key)).do_final(input),
        }
    }

    /// 先做 Base64 解码再解密。Base64 无效视为密文损坏
    pub fn decrypt_base64(&self, input: &str) -> Result<Vec<u8>> {
        if self.private_key.is_none() {
            return Err(Error::UnconfiguredKey(KeyRole::Private));
        }
        let ciphertext = mime::decode(input).map_err(|e| {
            Error::CryptoOperation(format!("ciphertext is not valid Base64: {}", e))
        })?;
        self.decrypt_bytes(&ciphertext)
    }

    /// 解密并按 UTF-8 解码
    pub fn decrypt_string(&self, input: &[u8]) -> Result<String> {
        Ok(String::from_utf8(self.decrypt_bytes(input)?)?)
    }

    pub fn decrypt_base64_string(&self, input: &str) -> Result<String> {
        Ok(String::from_utf8(self.decrypt_base64(input)?)?)
    }
}

impl fmt::Debug for CipherSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherSession")
            .field("transformation", &self.transformation)
            .field("key_size", &self.key_size)
            .field("handle_policy", &self.handle_policy)
            .field("has_public_key", &self.public_key.is_some())
            .field("has_private_key", &self.private_key.is_some())
            .finish()
    }
}

/// 获取缓存句柄。锁中毒时丢弃残留的缓冲数据后继续使用
fn lock(handle: &Mutex<Cipher>) -> MutexGuard<'_, Cipher> {
    handle.lock().unwrap_or_else(|poisoned| {
        let mut guard = poisoned.into_inner();
        guard.reset();
        guard
    })
}
