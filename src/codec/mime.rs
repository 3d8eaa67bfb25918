//! MIME 风格的 Base64：标准字母表，每行 76 个字符
use base64::{DecodeError, Engine as _, engine::general_purpose::STANDARD};
use rsa::pkcs8::LineEnding;

/// 每行的最大字符数
pub const LINE_WIDTH: usize = 76;

/// 编码并按 76 个字符换行，最后一行之后不追加换行符
pub fn encode(bytes: &[u8], line_ending: LineEnding) -> String {
    let encoded = STANDARD.encode(bytes);
    let mut wrapped = String::with_capacity(
        encoded.len() + (encoded.len() / LINE_WIDTH) * separator(line_ending).len(),
    );
    // base64 输出只包含 ASCII，按字节切分是安全的
    for (i, chunk) in encoded.as_bytes().chunks(LINE_WIDTH).enumerate() {
        if i > 0 {
            wrapped.push_str(separator(line_ending));
        }
        wrapped.push_str(std::str::from_utf8(chunk).unwrap_or_default());
    }
    wrapped
}

/// 换行符对应的字符串
pub fn separator(line_ending: LineEnding) -> &'static str {
    std::str::from_utf8(line_ending.as_bytes()).unwrap_or("\n")
}

/// 解码，忽略所有 ASCII 空白（包括换行）
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    STANDARD.decode(compact)
}
