//!
//! # 通用配置模块
//!
//! 包含密钥生成、加解密会话与密钥文件存储所使用的配置结构。
//! 配置可以从 JSON 文件或环境变量加载，并用于预先填充各个构建器。
//!
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::common::errors::{Error, Result};
use crate::keypair::KeyPairServiceBuilder;
use crate::session::CipherSessionBuilder;

/// 默认算法名称
pub const DEFAULT_ALGORITHM: &str = "RSA";
/// 默认密钥长度（位）
pub const DEFAULT_KEY_SIZE: usize = 2048;

/// 算法与密钥长度
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlgorithmSpec {
    /// 算法名称，例如 "RSA"
    pub name: String,
    /// 密钥长度（位）
    pub key_size: usize,
}

impl Default for AlgorithmSpec {
    fn default() -> Self {
        Self {
            name: DEFAULT_ALGORITHM.to_string(),
            key_size: DEFAULT_KEY_SIZE,
        }
    }
}

/// 加解密句柄的生命周期策略
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CipherHandlePolicy {
    /// 每次调用都创建新的句柄，可安全地被多个线程并发使用
    #[default]
    PerCall,
    /// 在 `build` 时创建句柄并在会话内复用，每次调用需要加锁
    SessionCached,
}

impl std::str::FromStr for CipherHandlePolicy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "per-call" | "per_call" | "percall" => Ok(CipherHandlePolicy::PerCall),
            "session-cached" | "session_cached" | "cached" => Ok(CipherHandlePolicy::SessionCached),
            other => Err(Error::Configuration(format!(
                "unknown cipher handle policy: {}",
                other
            ))),
        }
    }
}

/// 加解密会话配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CipherConfig {
    /// 转换名称，例如 "RSA" 或 "RSA/ECB/OAEPWithSHA-256AndMGF1Padding"
    pub transformation: String,
    /// 预期的密钥长度（位），仅作参考
    pub key_size: usize,
    /// 句柄策略
    #[serde(default)]
    pub handle_policy: CipherHandlePolicy,
}

impl Default for CipherConfig {
    fn default() -> Self {
        Self {
            transformation: DEFAULT_ALGORITHM.to_string(),
            key_size: DEFAULT_KEY_SIZE,
            handle_policy: CipherHandlePolicy::PerCall,
        }
    }
}

/// 存储配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StorageConfig {
    /// 私钥文件权限（Unix文件模式，如0o600）
    #[serde(default = "default_file_permissions")]
    pub private_key_permissions: u32,
    /// 是否先写入临时文件再重命名
    #[serde(default = "default_atomic_writes")]
    pub atomic_writes: bool,
}

fn default_file_permissions() -> u32 {
    0o600 // 等同于 -rw-------
}

fn default_atomic_writes() -> bool {
    true
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            private_key_permissions: default_file_permissions(),
            atomic_writes: default_atomic_writes(),
        }
    }
}

/// 完整配置文件
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct KeyToolConfig {
    /// 密钥对生成配置
    #[serde(default)]
    pub key_pair: AlgorithmSpec,
    /// 加解密会话配置
    #[serde(default)]
    pub cipher: CipherConfig,
    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,
}

impl KeyToolConfig {
    /// 从 JSON 文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = serde_json::from_str(&contents).map_err(|e| {
            Error::Configuration(format!("failed to parse {}: {}", path.display(), e))
        })?;
        tracing::debug!(path = %path.display(), "loaded key tool configuration");
        Ok(config)
    }

    /// 从环境变量加载配置，无法解析的值会被忽略
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(value) = std::env::var("RSA_KEYTOOL_ALGORITHM") {
            config.key_pair.name = value;
        }

        if let Ok(value) = std::env::var("RSA_KEYTOOL_KEY_SIZE") {
            if let Ok(bits) = value.parse::<usize>() {
                config.key_pair.key_size = bits;
            }
        }

        if let Ok(value) = std::env::var("RSA_KEYTOOL_TRANSFORMATION") {
            config.cipher.transformation = value;
        }

        if let Ok(value) = std::env::var("RSA_KEYTOOL_CIPHER_KEY_SIZE") {
            if let Ok(bits) = value.parse::<usize>() {
                config.cipher.key_size = bits;
            }
        }

        if let Ok(value) = std::env::var("RSA_KEYTOOL_HANDLE_POLICY") {
            match value.parse::<CipherHandlePolicy>() {
                Ok(policy) => config.cipher.handle_policy = policy,
                Err(e) => tracing::warn!(error = %e, "ignoring RSA_KEYTOOL_HANDLE_POLICY"),
            }
        }

        // 八进制，例如 "600"
        if let Ok(value) = std::env::var("RSA_KEYTOOL_FILE_PERMISSIONS") {
            if let Ok(mode) = u32::from_str_radix(value.trim_start_matches("0o"), 8) {
                config.storage.private_key_permissions = mode;
            }
        }

        if let Ok(value) = std::env::var("RSA_KEYTOOL_ATOMIC_WRITES") {
            match value.trim().to_ascii_lowercase().parse::<bool>() {
                Ok(atomic) => config.storage.atomic_writes = atomic,
                Err(e) => tracing::warn!(error = %e, "ignoring RSA_KEYTOOL_ATOMIC_WRITES"),
            }
        }

        config
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    /// 按配置预先填充的密钥对服务构建器
    pub fn key_pair_service_builder(&self) -> KeyPairServiceBuilder {
        KeyPairServiceBuilder::default()
            .algorithm(self.key_pair.name.clone())
            .key_size(self.key_pair.key_size)
            .storage(self.storage.clone())
    }

    /// 按配置预先填充的加解密会话构建器（不含密钥）
    pub fn cipher_session_builder(&self) -> CipherSessionBuilder {
        CipherSessionBuilder::default()
            .algorithm(self.cipher.transformation.clone())
            .key_size(self.cipher.key_size)
            .handle_policy(self.cipher.handle_policy)
    }
}
