//! # 传统加密算法模块
//!
//! 本模块包含RSA等传统加密算法的实现。
//! 它提供符合 `AsymmetricCryptographicSystem` 特征的接口。

pub mod rsa;

pub use self::rsa::RsaCryptoSystem;
