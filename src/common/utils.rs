use std::fmt;
use std::ops::Deref;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 自动清零的字节向量，用于私钥等敏感数据
///
/// `Debug` 输出只包含长度，不包含内容。
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingVec(pub Vec<u8>);

impl fmt::Debug for ZeroizingVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZeroizingVec([REDACTED; {}])", self.0.len())
    }
}

impl Deref for ZeroizingVec {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for ZeroizingVec {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZeroizingVec {
    fn from(bytes: Vec<u8>) -> Self {
        ZeroizingVec(bytes)
    }
}
