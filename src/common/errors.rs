use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// 错误所属的类别，调用方据此分支处理，而不是匹配具体的错误文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// 算法名称无法识别
    UnsupportedAlgorithm,
    /// 密钥字节或密钥文件不符合要求的格式
    KeyFormat,
    /// 会话中缺少执行该操作所需的密钥
    UnconfiguredKey,
    /// 加解密本身失败（长度超限、填充错误、密文损坏等）
    CryptoOperation,
    /// 解密结果不是合法的 UTF-8
    Encoding,
    /// 文件读写失败
    Io,
    /// 配置文件无法解析或写出
    Configuration,
}

/// 会话中密钥的角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyRole {
    Public,
    Private,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::Public => f.write_str("public"),
            KeyRole::Private => f.write_str("private"),
        }
    }
}

/// 密钥管理与加解密操作可能遇到的错误类型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Invalid key format: {0}")]
    KeyFormat(String),

    #[error("There is no {0} key configured in this cipher session")]
    UnconfiguredKey(KeyRole),

    #[error("Unsupported RSA key size: {bits} bits (expected 512..=4096)")]
    InvalidKeySize { bits: usize },

    #[error("Cryptographic operation failed: {0}")]
    CryptoOperation(String),

    #[error("Decrypted data is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// 返回错误所属的类别
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedAlgorithm(_) => ErrorKind::UnsupportedAlgorithm,
            Error::KeyFormat(_) => ErrorKind::KeyFormat,
            Error::UnconfiguredKey(_) => ErrorKind::UnconfiguredKey,
            Error::InvalidKeySize { .. } | Error::CryptoOperation(_) => ErrorKind::CryptoOperation,
            Error::Encoding(_) => ErrorKind::Encoding,
            Error::Io { .. } => ErrorKind::Io,
            Error::Configuration(_) => ErrorKind::Configuration,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Configuration(format!("JSON error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
