//! 定义了非对称加密系统的核心 Trait。
use crate::common::errors::Result;
use crate::common::utils::ZeroizingVec;
use std::fmt::Debug;

/// `AsymmetricCryptographicSystem` 定义了非对称加密算法必须实现的核心功能。
///
/// 公钥统一以 X.509 SubjectPublicKeyInfo DER 导入导出，
/// 私钥统一以 PKCS#8 DER 导入导出。
pub trait AsymmetricCryptographicSystem {
    /// 公钥类型
    type PublicKey: Clone + Debug + Send + Sync;

    /// 私钥类型
    type PrivateKey: Clone + Debug + Send + Sync;

    /// 填充方案
    type Padding: Copy + Debug;

    /// 算法名称
    const NAME: &'static str;

    /// 生成指定长度（位）的密钥对
    fn generate_keypair(key_size: usize) -> Result<(Self::PublicKey, Self::PrivateKey)>;

    /// 使用公钥加密单个数据块
    fn encrypt(
        public_key: &Self::PublicKey,
        padding: Self::Padding,
        plaintext: &[u8],
    ) -> Result<Vec<u8>>;

    /// 使用私钥解密单个数据块
    fn decrypt(
        private_key: &Self::PrivateKey,
        padding: Self::Padding,
        ciphertext: &[u8],
    ) -> Result<Vec<u8>>;

    /// 单次加密允许的最大明文长度（字节）
    fn max_plaintext_len(public_key: &Self::PublicKey, padding: Self::Padding) -> usize;

    /// 密钥长度（位）
    fn key_bits(public_key: &Self::PublicKey) -> usize;

    /// 将公钥导出为 X.509 DER
    fn export_public_key(public_key: &Self::PublicKey) -> Result<Vec<u8>>;

    /// 将私钥导出为 PKCS#8 DER
    fn export_private_key(private_key: &Self::PrivateKey) -> Result<ZeroizingVec>;

    /// 从 X.509 DER 导入公钥
    fn import_public_key(der: &[u8]) -> Result<Self::PublicKey>;

    /// 从 PKCS#8 DER 导入私钥
    fn import_private_key(der: &[u8]) -> Result<Self::PrivateKey>;
}
