//! # 密钥编解码
//!
//! 在原始密钥字节与两种容器格式之间做无损转换：
//!
//! - **二进制**：原样的 DER 字节（公钥为 X.509 SubjectPublicKeyInfo，私钥为 PKCS#8）。
//! - **文本**：DER 字节经 MIME Base64 编码（每行 76 个字符），
//!   前后分别是 `-----BEGIN <LABEL>-----` 与 `-----END <LABEL>-----` 标记行。
//!
//! 文本解码只会去掉第一行和最后一行，其余各行直接拼接后再做 Base64 解码。
pub mod mime;

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use rsa::pkcs8::LineEnding;
use rsa::{RsaPrivateKey, RsaPublicKey};

use crate::asymmetric::systems::traditional::RsaCryptoSystem;
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::common::errors::{Error, Result};

/// 公钥标记行使用的标签
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
/// 私钥标记行使用的标签
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";

const MARKER_DASHES: &str = "-----";

/// 密钥文件的容器格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyFormat {
    /// 原始 DER 字节
    Binary,
    /// 带标记行的 Base64 文本（类 PEM）
    Text,
}

impl FromStr for KeyFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "binary" | "der" => Ok(KeyFormat::Binary),
            "text" | "pem" => Ok(KeyFormat::Text),
            other => Err(Error::Configuration(format!("unknown key format: {}", other))),
        }
    }
}

impl fmt::Display for KeyFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyFormat::Binary => f.write_str("binary"),
            KeyFormat::Text => f.write_str("text"),
        }
    }
}

/// 二进制编码：原样返回，与 [`decode_binary`] 对称
pub fn encode_binary(key: &[u8]) -> Vec<u8> {
    key.to_vec()
}

/// 文本编码：MIME Base64 正文加上标记行，每一行都以 `line_ending` 结尾
pub fn encode_text(key: &[u8], label: &str, line_ending: LineEnding) -> String {
    let eol = mime::separator(line_ending);
    let body = mime::encode(key, line_ending);

    let mut text = String::with_capacity(body.len() + 2 * (label.len() + 16));
    text.push_str(&format!("{MARKER_DASHES}BEGIN {label}{MARKER_DASHES}{eol}"));
    if !body.is_empty() {
        text.push_str(&body);
        text.push_str(eol);
    }
    text.push_str(&format!("{MARKER_DASHES}END {label}{MARKER_DASHES}{eol}"));
    text
}

/// 读取二进制密钥文件的全部内容
pub fn decode_binary<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|e| Error::io(path, e))
}

/// 读取文本密钥文件并解码出 DER 字节
pub fn decode_text<P: AsRef<Path>>(path: P) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let text = String::from_utf8(bytes).map_err(|_| {
        Error::KeyFormat(format!("{} is not a text key file", path.display()))
    })?;
    decode_text_str(&text)
}

/// 解码文本容器：去掉首行和末行，拼接其余各行后做 Base64 解码
pub fn decode_text_str(text: &str) -> Result<Vec<u8>> {
    let lines: Vec<&str> = text.lines().collect();
    if lines.len() < 2 {
        return Err(Error::KeyFormat(
            "text key must have a BEGIN marker line and an END marker line".to_string(),
        ));
    }

    let first = lines[0];
    let last = lines[lines.len() - 1];
    if !is_marker(first, "BEGIN") {
        return Err(Error::KeyFormat(format!(
            "first line is not a BEGIN marker: {:?}",
            first
        )));
    }
    if !is_marker(last, "END") {
        return Err(Error::KeyFormat(format!(
            "last line is not an END marker: {:?}",
            last
        )));
    }

    let body_lines = &lines[1..lines.len() - 1];
    if body_lines.iter().any(|line| line.trim().is_empty()) {
        return Err(Error::KeyFormat("blank line inside key body".to_string()));
    }

    let body = body_lines.concat();
    mime::decode(&body).map_err(|e| Error::KeyFormat(format!("invalid Base64 key body: {}", e)))
}

/// 按格式读取密钥文件
pub fn decode<P: AsRef<Path>>(path: P, format: KeyFormat) -> Result<Vec<u8>> {
    match format {
        KeyFormat::Binary => decode_binary(path),
        KeyFormat::Text => decode_text(path),
    }
}

/// 把字节严格按 X.509 SubjectPublicKeyInfo 解析为公钥
pub fn parse_public_key(bytes: &[u8]) -> Result<RsaPublicKey> {
    RsaCryptoSystem::import_public_key(bytes)
}

/// 把字节严格按 PKCS#8 解析为私钥，PKCS#1 私钥会被拒绝
pub fn parse_private_key(bytes: &[u8]) -> Result<RsaPrivateKey> {
    RsaCryptoSystem::import_private_key(bytes)
}

fn is_marker(line: &str, kind: &str) -> bool {
    let line = line.trim_end();
    line.strip_prefix(MARKER_DASHES)
        .and_then(|rest| rest.strip_prefix(kind))
        .and_then(|rest| rest.strip_suffix(MARKER_DASHES))
        .is_some_and(|label| label.starts_with(' ') && !label.trim().is_empty())
}
