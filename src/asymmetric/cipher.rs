//! 加解密句柄
//!
//! 一个 `Cipher` 只绑定一个密钥和一个方向（加密或解密）。
//! `update` 会把输入累积到内部缓冲区，`do_final` 把缓冲区与最后一段输入
//! 作为一个数据块处理，并清空缓冲区。缓冲区是句柄唯一的可变状态，
//! 因此同一个句柄在多线程间共享时必须加锁。
use std::fmt;
use std::sync::Arc;

use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroize;

use crate::asymmetric::algorithm::{Algorithm, Transformation};
use crate::asymmetric::systems::traditional::RsaCryptoSystem;
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::common::errors::Result;

/// 句柄方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CipherMode {
    Encrypt,
    Decrypt,
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CipherMode::Encrypt => f.write_str("encrypt"),
            CipherMode::Decrypt => f.write_str("decrypt"),
        }
    }
}

#[derive(Clone)]
enum BoundKey {
    Public(Arc<RsaPublicKey>),
    Private(Arc<RsaPrivateKey>),
}

/// 绑定了算法、填充方案与密钥的单向加解密句柄
#[derive(Clone)]
pub struct Cipher {
    transformation: Transformation,
    key: BoundKey,
    buffer: Vec<u8>,
}

impl Cipher {
    /// 创建加密模式的句柄
    pub fn for_encryption(transformation: Transformation, key: Arc<RsaPublicKey>) -> Self {
        debug_assert_eq!(transformation.algorithm(), Algorithm::Rsa);
        Self {
            transformation,
            key: BoundKey::Public(key),
            buffer: Vec::new(),
        }
    }

    /// 创建解密模式的句柄
    pub fn for_decryption(transformation: Transformation, key: Arc<RsaPrivateKey>) -> Self {
        debug_assert_eq!(transformation.algorithm(), Algorithm::Rsa);
        Self {
            transformation,
            key: BoundKey::Private(key),
            buffer: Vec::new(),
        }
    }

    pub fn mode(&self) -> CipherMode {
        match self.key {
            BoundKey::Public(_) => CipherMode::Encrypt,
            BoundKey::Private(_) => CipherMode::Decrypt,
        }
    }

    pub fn transformation(&self) -> Transformation {
        self.transformation
    }

    /// 数据块长度（字节），即密文长度
    pub fn block_size(&self) -> usize {
        match &self.key {
            BoundKey::Public(key) => key.size(),
            BoundKey::Private(key) => key.size(),
        }
    }

    /// 单次 `do_final` 可以处理的最大输入长度（字节）
    pub fn max_input_len(&self) -> usize {
        match &self.key {
            BoundKey::Public(key) => {
                RsaCryptoSystem::max_plaintext_len(key, self.transformation.padding())
            }
            BoundKey::Private(_) => self.block_size(),
        }
    }

    /// 当前缓冲的字节数
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// 累积输入，不产生输出
    pub fn update(&mut self, input: &[u8]) {
        self.buffer.extend_from_slice(input);
    }

    /// 处理缓冲区与 `input` 拼接后的数据块。无论成功与否，缓冲区都会被清空。
    pub fn do_final(&mut self, input: &[u8]) -> Result<Vec<u8>> {
        let mut block = std::mem::take(&mut self.buffer);
        block.extend_from_slice(input);

        let padding = self.transformation.padding();
        let result = match &self.key {
            BoundKey::Public(key) => RsaCryptoSystem::encrypt(key, padding, &block),
            BoundKey::Private(key) => RsaCryptoSystem::decrypt(key, padding, &block),
        };
        block.zeroize();
        result
    }

    /// 丢弃已缓冲的输入
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("transformation", &self.transformation)
            .field("mode", &self.mode())
            .field("buffered", &self.buffer.len())
            .finish()
    }
}
