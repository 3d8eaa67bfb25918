//! 读取 `generate_key` 生成的密钥，加密后再解密一段文本
use rsa_keytool::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = KeyToolConfig::from_env();
    let service = config.key_pair_service_builder().build()?;
    let public_key = service.load_public_key("publicKey.pem", KeyFormat::Text)?;
    let private_key = service.load_private_key("privateKey.pem", KeyFormat::Text)?;

    let session = config
        .cipher_session_builder()
        .public_key(public_key)
        .private_key(private_key)
        .build()?;

    let message = std::env::args().nth(1).unwrap_or_else(|| "hello youtube.".to_string());
    let ciphertext = session.encrypt_string_to_base64(&message)?;
    println!("encrypted:\n{}", ciphertext);

    let decrypted = session.decrypt_base64_string(&ciphertext)?;
    println!("decrypted: {}", decrypted);
    Ok(())
}
