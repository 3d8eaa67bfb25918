//! 非对称加密：算法注册、RSA 实现以及单向的加解密句柄

pub mod algorithm;
pub mod cipher;
pub mod systems;
pub mod traits;

pub use self::algorithm::{Algorithm, Padding, Transformation};
pub use self::cipher::{Cipher, CipherMode};
pub use self::systems::traditional::RsaCryptoSystem;
pub use self::traits::AsymmetricCryptographicSystem;
