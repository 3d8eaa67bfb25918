//! 生成一对 2048 位 RSA 密钥，并以文本格式保存到当前目录
use rsa_keytool::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = KeyToolConfig::from_env();
    let service = config.key_pair_service_builder().build()?;
    let pair = service.generate_key_pair()?;
    service.save_text(&pair, "publicKey.pem", "privateKey.pem")?;

    println!(
        "{}-bit {} key pair written to publicKey.pem / privateKey.pem",
        service.key_size(),
        service.algorithm()
    );
    Ok(())
}
