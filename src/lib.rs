//! # rsa-keytool: RSA 密钥管理与加解密
//!
//! `rsa-keytool` 是一个小型的非对称密钥工具库：生成 RSA 密钥对，
//! 以二进制（DER）或文本（带标记行的 Base64）格式保存和读取密钥，
//! 并通过构建器配置的会话完成公钥加密、私钥解密。
//!
//! ## 核心概念
//!
//! - **`KeyPairService`**：按算法名称与密钥长度生成密钥对，负责密钥文件的读写。
//! - **`codec`**：密钥字节与两种容器格式之间的转换。
//! - **`CipherSession`**：绑定算法、填充方案与密钥的加解密会话，构建后只读，可跨线程共享。
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rsa_keytool::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let service = KeyPairService::builder().key_size(2048).build()?;
//!     let pair = service.generate_key_pair()?;
//!     service.save_text(&pair, "publicKey.pem", "privateKey.pem")?;
//!
//!     let session = CipherSession::builder()
//!         .key_size(2048)
//!         .public_key(service.load_public_key("publicKey.pem", KeyFormat::Text)?)
//!         .private_key(service.load_private_key("privateKey.pem", KeyFormat::Text)?)
//!         .build()?;
//!
//!     let ciphertext = session.encrypt_string_to_base64("hello youtube.")?;
//!     assert_eq!(session.decrypt_base64_string(&ciphertext)?, "hello youtube.");
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod codec;
pub mod common;
pub mod keypair;
pub mod session;

/// The version of the `rsa-keytool` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// --- Prelude ---
// 最常用的类型与 trait
pub mod prelude {
    pub use crate::asymmetric::algorithm::{Algorithm, Padding, Transformation};
    pub use crate::asymmetric::traits::AsymmetricCryptographicSystem;
    pub use crate::codec::KeyFormat;
    pub use crate::common::config::{CipherHandlePolicy, KeyToolConfig, StorageConfig};
    pub use crate::common::errors::{Error, ErrorKind, KeyRole, Result};
    pub use crate::keypair::{KeyPair, KeyPairService, KeyPairServiceBuilder};
    pub use crate::session::{CipherSession, CipherSessionBuilder};
}

pub use asymmetric::systems::traditional::RsaCryptoSystem;
pub use codec::KeyFormat;
pub use common::config::{CipherHandlePolicy, KeyToolConfig};
pub use common::errors::{Error, ErrorKind, Result};
pub use keypair::{KeyPair, KeyPairService};
pub use session::{CipherSession, CipherSessionBuilder};
