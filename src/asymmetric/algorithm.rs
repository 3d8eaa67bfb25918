//! 算法与转换名称的解析
//!
//! 转换名称的格式为 `ALG` 或 `ALG/MODE/PADDING`，例如 `RSA/ECB/PKCS1Padding`。
//! 名称不区分大小写。
use std::fmt;
use std::str::FromStr;

use crate::common::errors::{Error, Result};

/// 已注册的非对称算法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Rsa,
}

impl Algorithm {
    /// 按名称查找算法，找不到时返回 `UnsupportedAlgorithm`
    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "RSA" => Ok(Algorithm::Rsa),
            _ => Err(Error::UnsupportedAlgorithm(format!(
                "no key pair generator or key factory for '{}'",
                name
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Rsa => "RSA",
        }
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Algorithm::from_name(s)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 加密填充方案
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Padding {
    /// RSAES-PKCS1-v1_5
    #[default]
    Pkcs1v15,
    /// RSAES-OAEP，SHA-256 与 MGF1-SHA-256
    OaepSha256,
}

impl Padding {
    /// 填充占用的字节数
    pub fn overhead(self) -> usize {
        match self {
            Padding::Pkcs1v15 => 11,
            // 2 * hLen + 2
            Padding::OaepSha256 => 2 * 32 + 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Padding::Pkcs1v15 => "PKCS1Padding",
            Padding::OaepSha256 => "OAEPWithSHA-256AndMGF1Padding",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        if name.eq_ignore_ascii_case("PKCS1Padding") {
            Some(Padding::Pkcs1v15)
        } else if name.eq_ignore_ascii_case("OAEPWithSHA-256AndMGF1Padding") {
            Some(Padding::OaepSha256)
        } else {
            None
        }
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 算法加填充方案，决定一个加解密句柄的行为
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transformation {
    algorithm: Algorithm,
    padding: Padding,
}

impl Transformation {
    pub fn new(algorithm: Algorithm, padding: Padding) -> Self {
        Self { algorithm, padding }
    }

    /// 解析转换名称
    pub fn parse(name: &str) -> Result<Self> {
        let parts: Vec<&str> = name.split('/').map(str::trim).collect();
        match parts.as_slice() {
            [algorithm] => Ok(Self::new(Algorithm::from_name(algorithm)?, Padding::default())),
            [algorithm, mode, padding] => {
                let algorithm = Algorithm::from_name(algorithm)?;
                if !mode.eq_ignore_ascii_case("ECB") && !mode.eq_ignore_ascii_case("NONE") {
                    return Err(Error::UnsupportedAlgorithm(format!(
                        "unsupported cipher mode '{}' in '{}'",
                        mode, name
                    )));
                }
                let padding = Padding::from_name(padding).ok_or_else(|| {
                    Error::UnsupportedAlgorithm(format!(
                        "unsupported padding '{}' in '{}'",
                        padding, name
                    ))
                })?;
                Ok(Self::new(algorithm, padding))
            }
            _ => Err(Error::UnsupportedAlgorithm(format!(
                "malformed transformation '{}'",
                name
            ))),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn padding(&self) -> Padding {
        self.padding
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::new(Algorithm::Rsa, Padding::default())
    }
}

impl FromStr for Transformation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Transformation::parse(s)
    }
}

impl fmt::Display for Transformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/ECB/{}", self.algorithm, self.padding)
    }
}
